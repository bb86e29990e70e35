//! Payment instruments

use crate::compose::Contributor;
use crate::types::constants::{params, tenders};
use serde::{Deserialize, Serialize};

/// Credit or debit card instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Card number
    pub acct: String,
    /// Expiry date in `mmyy` form
    pub exp_date: String,
    /// Card security code
    pub cvv2: Option<String>,
}

impl CreditCard {
    /// Create a card instrument
    pub fn new(acct: impl Into<String>, exp_date: impl Into<String>) -> Self {
        Self {
            acct: acct.into(),
            exp_date: exp_date.into(),
            cvv2: None,
        }
    }

    /// Set the card security code
    pub fn with_cvv2(mut self, cvv2: impl Into<String>) -> Self {
        self.cvv2 = Some(cvv2.into());
        self
    }
}

/// ACH bank account instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAcct {
    /// Bank account number
    pub acct: String,
    /// Bank routing number
    pub aba: String,
    /// Account type ("C" checking, "S" savings)
    pub acct_type: Option<String>,
}

impl BankAcct {
    /// Create a bank account instrument
    pub fn new(acct: impl Into<String>, aba: impl Into<String>) -> Self {
        Self {
            acct: acct.into(),
            aba: aba.into(),
            acct_type: None,
        }
    }

    /// Set the account type
    pub fn with_acct_type(mut self, acct_type: impl Into<String>) -> Self {
        self.acct_type = Some(acct_type.into());
        self
    }
}

/// Payment instrument contributed as the TENDER block.
///
/// A transaction may omit the tender entirely (e.g., a recurring-profile
/// metadata update); the composer then simply contributes nothing for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Tender {
    /// Card tender (`TENDER=C`)
    Card(CreditCard),
    /// ACH tender (`TENDER=A`)
    Ach(BankAcct),
}

impl Contributor for Tender {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        match self {
            Tender::Card(card) => vec![
                (params::TENDER, Some(tenders::CARD.to_string())),
                (params::ACCT, Some(card.acct.clone())),
                (params::EXPDATE, Some(card.exp_date.clone())),
                (params::CVV2, card.cvv2.clone()),
            ],
            Tender::Ach(bank) => vec![
                (params::TENDER, Some(tenders::ACH.to_string())),
                (params::ACCT, Some(bank.acct.clone())),
                (params::ABA, Some(bank.aba.clone())),
                (params::ACCTTYPE, bank.acct_type.clone()),
            ],
        }
    }
}
