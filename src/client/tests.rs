//! End-to-end submission tests against a scripted in-memory gateway

use super::*;
use crate::transport::Connection;
use crate::types::{trxtypes, CreditCard, Invoice, Tender, UserInfo};
use crate::PayflowError;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};

/// Connector that refuses the first `refusals` attempts, then serves `reply`
struct ScriptedGateway {
    refusals: usize,
    reply: &'static str,
    attempts: AtomicUsize,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    fn new(reply: &'static str) -> Self {
        Self::with_refusals(0, reply)
    }

    fn with_refusals(refusals: usize, reply: &'static str) -> Self {
        Self {
            refusals,
            reply,
            attempts: AtomicUsize::new(0),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for ScriptedGateway {
    async fn connect(&self, _config: &GatewayConfig) -> crate::Result<Connection> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.refusals {
            return Err(PayflowError::connection_failed("connection refused"));
        }

        let (client, mut server) = duplex(8192);
        let reply = self.reply;
        let requests = Arc::clone(&self.requests);
        tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let n = server.read(&mut buf).await.unwrap_or(0);
            requests
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&buf[..n]).to_string());
            let _ = server.write_all(reply.as_bytes()).await;
        });
        Ok(Box::new(client))
    }
}

fn test_client(gateway: Arc<ScriptedGateway>) -> PayflowClient {
    let config = GatewayConfig::new("gateway.test").with_timeout_secs(1);
    PayflowClient::with_connector(config, gateway).unwrap()
}

fn sale_transaction() -> Transaction {
    let user = UserInfo::new("user", "vendor", "PayPal", "pwd");
    Transaction::new(user, trxtypes::SALE)
        .with_request_id("req-e2e")
        .with_tender(Tender::Card(CreditCard::new("5105105105105100", "0126")))
        .with_invoice(
            Invoice::new()
                .with_amt(rust_decimal::Decimal::from_str("25.12").unwrap())
                .with_po_num("PO12345"),
        )
}

#[tokio::test]
async fn test_submit_approved_sale() {
    let gateway = Arc::new(ScriptedGateway::new(
        "RESULT=0&PNREF=V19A2A192DD0&RESPMSG=Approved&AUTHCODE=111111",
    ));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert_eq!(response.request_id, "req-e2e");
    let trxn = response.transaction_response.unwrap();
    assert!(trxn.is_approved());
    assert_eq!(trxn.resp_msg.as_deref(), Some("Approved"));
    assert_eq!(trxn.pnref.as_deref(), Some("V19A2A192DD0"));
    assert!(!response.context.has_errors());
    assert_eq!(gateway.attempts(), 1);

    // The wire request carried the idempotency key and the instrument.
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("REQUEST_ID[7]=req-e2e"));
    assert!(requests[0].contains("TENDER[1]=C"));
}

#[tokio::test]
async fn test_submit_decline_is_not_an_sdk_error() {
    let gateway = Arc::new(ScriptedGateway::new("RESULT=12&RESPMSG=Declined"));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    let trxn = response.transaction_response.unwrap();
    assert_eq!(trxn.result, 12);
    assert!(!trxn.is_approved());
    // A decline is business data from a successful round trip.
    assert_eq!(response.context.error_count(), 0);
}

#[tokio::test]
async fn test_submit_recurring_splits_response_objects() {
    let gateway = Arc::new(ScriptedGateway::new(
        "RESULT=0&RESPMSG=Approved&RPREF=RP1&PROFILEID=P1",
    ));
    let client = test_client(Arc::clone(&gateway));

    let user = UserInfo::new("user", "vendor", "PayPal", "pwd");
    let transaction = Transaction::new(user, trxtypes::RECURRING)
        .with_request_id("req-recurring")
        .with_recurring(
            crate::types::RecurringInfo::new().with_orig_profile_id("RP0000001234"),
        );

    let response = client.submit(transaction).await;

    let trxn = response.transaction_response.unwrap();
    assert_eq!(trxn.result, 0);
    assert_eq!(trxn.resp_msg.as_deref(), Some("Approved"));

    let recurring = response.recurring_response.unwrap();
    assert_eq!(recurring.rp_ref.as_deref(), Some("RP1"));
    assert_eq!(recurring.profile_id.as_deref(), Some("P1"));

    assert!(response.context.entries().is_empty());
}

#[tokio::test]
async fn test_submit_without_mandatory_result_records_fatal_error() {
    // The reply resembles an echo of request fields with RESULT omitted.
    let gateway = Arc::new(ScriptedGateway::new("AMT=25.12&PONUM=PO12345"));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert!(response.transaction_response.is_none());
    assert_eq!(response.context.error_count(), 1);
    assert!(response.context.as_text().contains("MalformedResponse"));
}

#[tokio::test]
async fn test_submit_retries_connect_once_then_succeeds() {
    let gateway = Arc::new(ScriptedGateway::with_refusals(1, "RESULT=0"));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert!(response.transaction_response.unwrap().is_approved());
    assert!(!response.context.has_errors());
    assert_eq!(gateway.attempts(), 2);
}

#[tokio::test]
async fn test_submit_surfaces_connection_failure_after_one_retry() {
    let gateway = Arc::new(ScriptedGateway::with_refusals(usize::MAX, ""));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert!(response.transaction_response.is_none());
    assert_eq!(response.context.error_count(), 1);
    assert!(response.context.as_text().contains("ConnectionFailed"));
    assert_eq!(gateway.attempts(), 2);
}

#[tokio::test]
async fn test_submit_reports_vendor_fields_as_diagnostics() {
    let gateway = Arc::new(ScriptedGateway::new(
        "RESULT=0&RESPMSG=Approved&XVENDORFIELD=opaque",
    ));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert!(response.transaction_response.unwrap().is_approved());
    assert_eq!(response.context.error_count(), 0);
    assert!(response
        .context
        .entries()
        .iter()
        .any(|e| e.kind == "UnclaimedField" && e.message.contains("XVENDORFIELD=opaque")));
}

#[tokio::test]
async fn test_submit_rejects_malformed_reply_framing() {
    // A length tag that overruns the reply is fatal, never truncated.
    let gateway = Arc::new(ScriptedGateway::new("RESULT[99]=0"));
    let client = test_client(Arc::clone(&gateway));

    let response = client.submit(sale_transaction()).await;

    assert!(response.transaction_response.is_none());
    assert_eq!(response.context.error_count(), 1);
    assert!(response.context.as_text().contains("MalformedWireMessage"));
}

#[test]
fn test_client_rejects_invalid_config() {
    let config = GatewayConfig::new("").with_timeout_secs(45);
    assert!(PayflowClient::new(config).is_err());
}
