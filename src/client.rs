//! High-level Payflow client
//!
//! [`PayflowClient`] owns an immutable [`GatewayConfig`] and turns one
//! [`Transaction`] into one [`Response`] bundle: compose, connect, send,
//! await, decode, decompose. Every SDK-internal failure along the way is
//! collected into the response's [`Context`] instead of aborting the caller;
//! inspect the context after every submission.
//!
//! # Examples
//!
//! ```no_run
//! use rust_payflow::client::PayflowClient;
//! use rust_payflow::compose::Transaction;
//! use rust_payflow::config::GatewayConfig;
//! use rust_payflow::types::{trxtypes, CreditCard, Invoice, Tender, UserInfo};
//! use std::str::FromStr;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::new("pilot-payflowpro.paypal.com").with_timeout_secs(45);
//! let client = PayflowClient::new(config)?;
//!
//! let user = UserInfo::new("merchant", "merchant", "PayPal", "secret");
//! let transaction = Transaction::new(user, trxtypes::SALE)
//!     .with_tender(Tender::Card(CreditCard::new("5105105105105100", "0126")))
//!     .with_invoice(Invoice::new().with_amt(rust_decimal::Decimal::from_str("25.12")?));
//!
//! let response = client.submit(transaction).await;
//! if let Some(trxn) = &response.transaction_response {
//!     println!("RESULT = {}", trxn.result);
//!     println!("RESPMSG = {}", trxn.resp_msg.as_deref().unwrap_or(""));
//! }
//! if response.context.has_errors() {
//!     eprintln!("{}", response.context.as_text());
//! }
//! # Ok(())
//! # }
//! ```

use crate::codec;
use crate::compose::Transaction;
use crate::config::GatewayConfig;
use crate::context::Context;
use crate::response::{self, Response};
use crate::transport::{Connector, Dispatcher, TlsConnector, TransactionState};
use crate::Result;
use std::sync::Arc;

/// One-shot submission client for the Payflow gateway
#[derive(Clone)]
pub struct PayflowClient {
    config: GatewayConfig,
    connector: Arc<dyn Connector>,
}

impl std::fmt::Debug for PayflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayflowClient")
            .field("config", &self.config)
            .finish()
    }
}

impl PayflowClient {
    /// Create a client with the production TLS connector
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_connector(config, Arc::new(TlsConnector))
    }

    /// Create a client with a custom [`Connector`] (e.g., for tests)
    pub fn with_connector(config: GatewayConfig, connector: Arc<dyn Connector>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, connector })
    }

    /// The configuration this client submits with
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Submit one transaction and collect its typed response bundle.
    ///
    /// Never returns an error: SDK failures are recorded in the returned
    /// [`Context`] and leave the typed sub-objects unset (or partially set
    /// when the failure occurred after some fields were already parsed).
    pub async fn submit(&self, transaction: Transaction) -> Response {
        let mut response = Response::empty(transaction.request_id.clone());
        let mut context = Context::new();
        let mut dispatcher = Dispatcher::new(&self.config, self.connector.as_ref());

        match self
            .run(&transaction, &mut dispatcher, &mut response, &mut context)
            .await
        {
            Ok(()) => {
                dispatcher.transition(TransactionState::Done);
                tracing::info!(request_id = %response.request_id, "submission complete");
            }
            Err(e) => {
                context.record_error(&e);
                if dispatcher.state() != TransactionState::Error {
                    dispatcher.transition(TransactionState::Error);
                }
            }
        }

        response.context = context;
        response
    }

    async fn run(
        &self,
        transaction: &Transaction,
        dispatcher: &mut Dispatcher<'_>,
        response: &mut Response,
        context: &mut Context,
    ) -> Result<()> {
        dispatcher.transition(TransactionState::Composing);
        let wire = transaction.compose()?;

        let raw = dispatcher.dispatch(&wire).await?;

        dispatcher.transition(TransactionState::Decoding);
        let params = codec::decode_message(&raw)?;
        let (transaction_resp, fraud, recurring, buyer_auth) =
            response::decompose(params, context)?;

        response.transaction_response = Some(transaction_resp);
        response.fraud_response = fraud;
        response.recurring_response = recurring;
        response.buyer_auth_response = buyer_auth;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
