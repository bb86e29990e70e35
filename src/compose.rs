//! Request composition
//!
//! A [`Transaction`] is an ordered tree of [`Contributor`]s. Composition
//! walks the tree depth-first in the protocol-mandated order and appends each
//! contributor's fields to one shared [`RequestBuffer`], producing the single
//! immutable wire message sent to the gateway. Composition never touches the
//! network.
//!
//! Contributors are declarative: each one returns its `(wire-name, value)`
//! table from [`Contributor::fields`] and its nested blocks from
//! [`Contributor::children`], and the generic walk does the rest. Field order
//! within a contributor is fixed, so identical field sets always produce
//! byte-identical wire messages.

use crate::codec;
use crate::types::constants::{params, trxtypes};
use crate::types::{BuyerAuthInfo, FraudInfo, Invoice, RecurringInfo, Tender, UserInfo};
use crate::{PayflowError, Result};

/// Shared buffer a [`Contributor`] appends encoded fields into
#[derive(Debug, Default)]
pub struct RequestBuffer {
    buf: String,
}

impl RequestBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one field; empty values contribute nothing
    pub fn append(&mut self, name: &str, value: &str) {
        codec::append_field(&mut self.buf, name, value);
    }

    /// Finish composition, yielding the immutable wire message
    pub fn into_wire(self) -> String {
        self.buf
    }
}

/// A data object that contributes a fixed subset of named fields to a request
pub trait Contributor {
    /// Ordered `(wire-name, value)` table for this object.
    ///
    /// `None` and empty values are omitted from the wire entirely.
    fn fields(&self) -> Vec<(&'static str, Option<String>)>;

    /// Nested blocks, contributed depth-first after this object's own fields
    fn children(&self) -> Vec<&dyn Contributor> {
        Vec::new()
    }

    /// Append this object's fields (then its children's) to the buffer
    fn contribute(&self, buf: &mut RequestBuffer) {
        for (name, value) in self.fields() {
            if let Some(value) = value {
                buf.append(name, &value);
            }
        }
        for child in self.children() {
            child.contribute(buf);
        }
    }
}

/// One gateway transaction: an ordered tree of contributors.
///
/// Constructed by the caller, immutable once submission begins, and consumed
/// by a single submission; a new `Transaction` is built for each request.
///
/// # Examples
///
/// ```
/// use rust_payflow::compose::Transaction;
/// use rust_payflow::types::{trxtypes, CreditCard, Invoice, Tender, UserInfo};
/// use std::str::FromStr;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user = UserInfo::new("merchant", "merchant", "PayPal", "secret");
/// let card = CreditCard::new("5105105105105100", "0126").with_cvv2("123");
/// let invoice = Invoice::new()
///     .with_amt(rust_decimal::Decimal::from_str("25.12")?)
///     .with_po_num("PO12345");
///
/// let transaction = Transaction::new(user, trxtypes::SALE)
///     .with_tender(Tender::Card(card))
///     .with_invoice(invoice);
/// let wire = transaction.compose()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Gateway credentials
    pub user: UserInfo,
    /// Transaction type code (see [`trxtypes`])
    pub trxtype: String,
    /// Client-generated idempotency key, one more field on the wire
    pub request_id: String,
    /// Response verbosity requested from the gateway
    pub verbosity: Option<String>,
    /// Payment instrument; absent for profile-metadata-only transactions
    pub tender: Option<Tender>,
    /// Invoice block (may nest billing/shipping addresses)
    pub invoice: Option<Invoice>,
    /// Recurring-profile block
    pub recurring: Option<RecurringInfo>,
    /// Fraud-screening block
    pub fraud: Option<FraudInfo>,
    /// Buyer-authentication block
    pub buyer_auth: Option<BuyerAuthInfo>,
}

impl Transaction {
    /// Create a transaction with a freshly generated request id
    pub fn new(user: UserInfo, trxtype: impl Into<String>) -> Self {
        Self {
            user,
            trxtype: trxtype.into(),
            request_id: uuid::Uuid::new_v4().simple().to_string(),
            verbosity: None,
            tender: None,
            invoice: None,
            recurring: None,
            fraud: None,
            buyer_auth: None,
        }
    }

    /// Override the generated request id with a caller-supplied one
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Request a response verbosity (e.g., "HIGH")
    pub fn with_verbosity(mut self, verbosity: impl Into<String>) -> Self {
        self.verbosity = Some(verbosity.into());
        self
    }

    /// Attach the payment instrument
    pub fn with_tender(mut self, tender: Tender) -> Self {
        self.tender = Some(tender);
        self
    }

    /// Attach the invoice block
    pub fn with_invoice(mut self, invoice: Invoice) -> Self {
        self.invoice = Some(invoice);
        self
    }

    /// Attach a recurring-profile block
    pub fn with_recurring(mut self, recurring: RecurringInfo) -> Self {
        self.recurring = Some(recurring);
        self
    }

    /// Attach a fraud-screening block
    pub fn with_fraud(mut self, fraud: FraudInfo) -> Self {
        self.fraud = Some(fraud);
        self
    }

    /// Attach a buyer-authentication block
    pub fn with_buyer_auth(mut self, buyer_auth: BuyerAuthInfo) -> Self {
        self.buyer_auth = Some(buyer_auth);
        self
    }

    /// Validate the request shape before composition
    pub fn validate(&self) -> Result<()> {
        if !trxtypes::is_supported(&self.trxtype) {
            return Err(PayflowError::config(format!(
                "Unknown transaction type {:?}",
                self.trxtype
            )));
        }
        if self.request_id.is_empty() {
            return Err(PayflowError::config("Request id must not be empty"));
        }
        self.user.validate()
    }

    /// Serialize the contributor tree into one wire message.
    ///
    /// The walk order is protocol-mandated: credentials first, then the
    /// request id and transaction type, then instrument, invoice, and the
    /// optional blocks. A missing tender simply contributes nothing, so a
    /// profile-metadata-only transaction composes cleanly.
    pub fn compose(&self) -> Result<String> {
        self.validate()?;

        let mut buf = RequestBuffer::new();
        self.user.contribute(&mut buf);
        buf.append(params::REQUEST_ID, &self.request_id);
        buf.append(params::TRXTYPE, &self.trxtype);
        if let Some(verbosity) = &self.verbosity {
            buf.append(params::VERBOSITY, verbosity);
        }
        for block in [
            self.tender.as_ref().map(|t| t as &dyn Contributor),
            self.invoice.as_ref().map(|i| i as &dyn Contributor),
            self.recurring.as_ref().map(|r| r as &dyn Contributor),
            self.fraud.as_ref().map(|f| f as &dyn Contributor),
            self.buyer_auth.as_ref().map(|b| b as &dyn Contributor),
        ]
        .into_iter()
        .flatten()
        {
            block.contribute(&mut buf);
        }

        let wire = buf.into_wire();
        tracing::debug!(bytes = wire.len(), trxtype = %self.trxtype, "composed request");
        Ok(wire)
    }
}

#[cfg(test)]
mod tests;
