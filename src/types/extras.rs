//! Optional request blocks: recurring profiles, fraud screening, buyer auth

use crate::compose::Contributor;
use crate::types::constants::params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recurring-profile block (`TRXTYPE=R` actions).
///
/// A profile-metadata update carries this block with no tender at all; the
/// composer treats the missing instrument as "contribute nothing".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecurringInfo {
    /// Profile name
    pub profile_name: Option<String>,
    /// Profile id being modified or queried
    pub orig_profile_id: Option<String>,
    /// Start date (mmddyyyy)
    pub start: Option<String>,
    /// Number of payments
    pub term: Option<u32>,
    /// Payment period (e.g., "WEEK", "MONT")
    pub pay_period: Option<String>,
    /// Optional transaction flag ("S" sale, "A" authorization)
    pub optional_trx: Option<String>,
    /// Optional transaction amount
    pub optional_trx_amt: Option<Decimal>,
}

impl RecurringInfo {
    /// Create an empty recurring block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile name
    pub fn with_profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    /// Set the original profile id
    pub fn with_orig_profile_id(mut self, orig_profile_id: impl Into<String>) -> Self {
        self.orig_profile_id = Some(orig_profile_id.into());
        self
    }

    /// Set the start date
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the number of payments
    pub fn with_term(mut self, term: u32) -> Self {
        self.term = Some(term);
        self
    }

    /// Set the payment period
    pub fn with_pay_period(mut self, pay_period: impl Into<String>) -> Self {
        self.pay_period = Some(pay_period.into());
        self
    }

    /// Set the optional transaction flag
    pub fn with_optional_trx(mut self, optional_trx: impl Into<String>) -> Self {
        self.optional_trx = Some(optional_trx.into());
        self
    }

    /// Set the optional transaction amount
    pub fn with_optional_trx_amt(mut self, amt: Decimal) -> Self {
        self.optional_trx_amt = Some(amt);
        self
    }
}

impl Contributor for RecurringInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::PROFILENAME, self.profile_name.clone()),
            (params::ORIGPROFILEID, self.orig_profile_id.clone()),
            (params::START, self.start.clone()),
            (params::TERM, self.term.map(|t| t.to_string())),
            (params::PAYPERIOD, self.pay_period.clone()),
            (params::OPTIONALTRX, self.optional_trx.clone()),
            (
                params::OPTIONALTRXAMT,
                self.optional_trx_amt.map(|a| a.to_string()),
            ),
        ]
    }
}

/// Fraud-screening block: customer environment details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FraudInfo {
    /// Customer IP address
    pub cust_ip: Option<String>,
    /// Customer host name
    pub cust_host_name: Option<String>,
    /// Customer browser identification
    pub cust_browser: Option<String>,
}

impl FraudInfo {
    /// Create an empty fraud block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the customer IP address
    pub fn with_cust_ip(mut self, cust_ip: impl Into<String>) -> Self {
        self.cust_ip = Some(cust_ip.into());
        self
    }

    /// Set the customer host name
    pub fn with_cust_host_name(mut self, cust_host_name: impl Into<String>) -> Self {
        self.cust_host_name = Some(cust_host_name.into());
        self
    }

    /// Set the customer browser string
    pub fn with_cust_browser(mut self, cust_browser: impl Into<String>) -> Self {
        self.cust_browser = Some(cust_browser.into());
        self
    }
}

impl Contributor for FraudInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::CUSTIP, self.cust_ip.clone()),
            (params::CUSTHOSTNAME, self.cust_host_name.clone()),
            (params::CUSTBROWSER, self.cust_browser.clone()),
        ]
    }
}

/// Buyer-authentication (3-D Secure) block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerAuthInfo {
    /// Authentication id from the verification step
    pub authentication_id: Option<String>,
    /// Authentication status
    pub authentication_status: Option<String>,
    /// Cardholder authentication verification value
    pub cavv: Option<String>,
    /// Electronic commerce indicator
    pub eci: Option<String>,
    /// Authentication transaction id
    pub xid: Option<String>,
}

impl BuyerAuthInfo {
    /// Create an empty buyer-auth block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication id
    pub fn with_authentication_id(mut self, authentication_id: impl Into<String>) -> Self {
        self.authentication_id = Some(authentication_id.into());
        self
    }

    /// Set the authentication status
    pub fn with_authentication_status(mut self, status: impl Into<String>) -> Self {
        self.authentication_status = Some(status.into());
        self
    }

    /// Set the CAVV
    pub fn with_cavv(mut self, cavv: impl Into<String>) -> Self {
        self.cavv = Some(cavv.into());
        self
    }

    /// Set the ECI
    pub fn with_eci(mut self, eci: impl Into<String>) -> Self {
        self.eci = Some(eci.into());
        self
    }

    /// Set the XID
    pub fn with_xid(mut self, xid: impl Into<String>) -> Self {
        self.xid = Some(xid.into());
        self
    }
}

impl Contributor for BuyerAuthInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::AUTHENTICATION_ID, self.authentication_id.clone()),
            (
                params::AUTHENTICATION_STATUS,
                self.authentication_status.clone(),
            ),
            (params::CAVV, self.cavv.clone()),
            (params::ECI, self.eci.clone()),
            (params::XID, self.xid.clone()),
        ]
    }
}
