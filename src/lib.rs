//! # Payflow Rust SDK
//!
//! A **type-safe** Rust client for the Payflow name-value-pair (NVP)
//! payment-gateway protocol.
//!
//! ## Features
//!
//! - 💳 **Typed transactions**: Card and ACH tenders, invoices with nested
//!   addresses, recurring profiles, fraud screening, and buyer authentication
//! - 📦 **Length-prefixed NVP codec**: `NAME[LEN]=value` encoding that
//!   round-trips free-text values containing any delimiter character
//! - 🔒 **One connection per submission**: TLS over TCP with an optional
//!   forward HTTP proxy, closed on every exit path
//! - ⏱️ **Bounded retries**: exactly one retry for transient connect
//!   failures, never after the request may have reached the gateway
//! - 🧾 **Context tracking**: SDK-internal errors collected per submission,
//!   kept apart from gateway business results like declines
//!
//! ## Quick Start
//!
//! ```no_run
//! use rust_payflow::client::PayflowClient;
//! use rust_payflow::compose::Transaction;
//! use rust_payflow::config::GatewayConfig;
//! use rust_payflow::types::{trxtypes, CreditCard, Invoice, Tender, UserInfo};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::new("pilot-payflowpro.paypal.com")
//!         .with_port(443)
//!         .with_timeout_secs(45);
//!     let client = PayflowClient::new(config)?;
//!
//!     let user = UserInfo::new("merchant", "merchant", "PayPal", "secret");
//!     let card = CreditCard::new("5105105105105100", "0126").with_cvv2("123");
//!     let invoice = Invoice::new()
//!         .with_amt(rust_decimal::Decimal::from_str("25.12")?)
//!         .with_po_num("PO12345");
//!
//!     let transaction = Transaction::new(user, trxtypes::SALE)
//!         .with_tender(Tender::Card(card))
//!         .with_invoice(invoice);
//!
//!     let response = client.submit(transaction).await;
//!     if let Some(trxn) = &response.transaction_response {
//!         println!("RESULT = {}", trxn.result);
//!         println!("RESPMSG = {}", trxn.resp_msg.as_deref().unwrap_or(""));
//!     }
//!     if response.context.has_errors() {
//!         eprintln!("SDK errors:\n{}", response.context.as_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - **`types`**: Request data objects (credentials, tenders, invoices, extras)
//! - **`codec`**: NVP field encoding and length-driven message decoding
//! - **`compose`**: Contributor tree walk producing one wire message
//! - **`response`**: Response decomposition into typed objects
//! - **`transport`**: Secure connection handling and the dispatch state machine
//! - **`client`**: One-shot submission pipeline
//! - **`context`**: Per-submission SDK error tracking
//! - **`config`**: Immutable gateway configuration
//! - **`error`**: Comprehensive error handling
//!
//! ## Error Model
//!
//! SDK-internal failures (configuration, transport, codec) are collected in
//! each submission's [`Context`](context::Context) and never panic the
//! caller. Gateway business outcomes, including declines, arrive as
//! ordinary typed response fields after a successful round trip.

pub mod client;
pub mod codec;
pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::PayflowClient;
pub use codec::ParamList;
pub use compose::{Contributor, RequestBuffer, Transaction};
pub use config::GatewayConfig;
pub use context::{Context, ContextEntry, Severity};
pub use error::{PayflowError, Result};
pub use response::{
    BuyerAuthResponse, FraudResponse, RecurringResponse, Response, TransactionResponse,
};
pub use transport::{Connector, Dispatcher, TlsConnector, TransactionState};
pub use types::*;

/// Current version of the Payflow SDK library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_round_trip_law() {
        // decode(encode(name, value)) == {name: value} for hostile values too.
        for value in ["PO12345", "25.12", "a&b=c", "[7]=x&y", "332 Briles Ct."] {
            let wire = codec::encode_field("FIELD", value);
            let decoded = codec::decode_message(&wire).unwrap();
            assert_eq!(decoded.get("FIELD"), Some(value));
            assert_eq!(decoded.len(), 1);
        }
    }

    #[test]
    fn test_mandatory_result_edge_case_end_to_end() {
        // Compose a message with RESULT omitted, push it through the codec,
        // then decompose expecting RESULT as mandatory: fatal decode error.
        let mut buf = String::new();
        codec::append_field(&mut buf, params::AMT, "25.12");
        codec::append_field(&mut buf, params::PONUM, "PO12345");

        let decoded = codec::decode_message(&buf).unwrap();
        let mut ctx = Context::new();
        let err = response::decompose(decoded, &mut ctx).unwrap_err();
        assert_eq!(err.kind(), "MalformedResponse");
    }

    #[test]
    fn test_typed_decomposition_end_to_end() {
        let decoded =
            codec::decode_message("RESULT=0&RESPMSG=Approved&RPREF=RP1&PROFILEID=P1").unwrap();
        let mut ctx = Context::new();
        let (trxn, _, recurring, _) = response::decompose(decoded, &mut ctx).unwrap();

        assert_eq!(trxn.result, 0);
        assert_eq!(trxn.resp_msg.as_deref(), Some("Approved"));
        let recurring = recurring.unwrap();
        assert_eq!(recurring.rp_ref.as_deref(), Some("RP1"));
        assert_eq!(recurring.profile_id.as_deref(), Some("P1"));
        assert!(ctx.entries().is_empty());
    }
}
