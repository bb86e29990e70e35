//! Request data objects for the Payflow NVP protocol
//!
//! Every type here is a [`Contributor`](crate::compose::Contributor): it owns
//! a fixed, non-overlapping subset of wire field names and exposes them as a
//! declarative `(wire-name, value)` table. The composer walks a transaction's
//! contributor tree depth-first and appends each table to the shared request
//! buffer; unset values never reach the wire.
//!
//! The module is organized as follows:
//! - [`constants`] - wire parameter names and transaction/tender type codes
//! - [`credentials`] - gateway login credentials
//! - [`tender`] - payment instruments (card, ACH)
//! - [`invoice`] - invoice with nested billing/shipping addresses
//! - [`extras`] - optional recurring/fraud/buyer-auth blocks

pub mod constants;
pub mod credentials;
pub mod extras;
pub mod invoice;
pub mod tender;

pub use constants::{params, tenders, trxtypes};
pub use credentials::UserInfo;
pub use extras::{BuyerAuthInfo, FraudInfo, RecurringInfo};
pub use invoice::{BillTo, Invoice, ShipTo};
pub use tender::{BankAcct, CreditCard, Tender};
