//! Tests for the dispatcher state machine and retry policy

use super::*;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::task::{Context as TaskContext, Poll};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio_test::assert_ok;

/// Scripted outcome for one connection attempt
enum Outcome {
    Refuse,
    Serve(DuplexStream),
}

/// Connector that counts attempts and plays back scripted outcomes
struct MockConnector {
    attempts: AtomicUsize,
    outcomes: Mutex<Vec<Outcome>>,
}

impl MockConnector {
    fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            outcomes: Mutex::new(outcomes),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _config: &GatewayConfig) -> Result<Connection> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcomes.lock().unwrap().remove(0);
        match outcome {
            Outcome::Refuse => Err(PayflowError::connection_failed("connection refused")),
            Outcome::Serve(stream) => Ok(Box::new(stream)),
        }
    }
}

/// Stream whose writes always fail, for partial-write classification
struct BrokenPipe;

impl AsyncRead for BrokenPipe {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        _buf: &mut tokio::io::ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for BrokenPipe {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe broke")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn test_config() -> GatewayConfig {
    GatewayConfig::new("gateway.test").with_timeout_secs(1)
}

/// Spawn a gateway that reads the request once and answers with `reply`
fn spawn_gateway(mut stream: DuplexStream, reply: &'static str) {
    tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        stream.write_all(reply.as_bytes()).await.unwrap();
        // Dropping the stream closes it, signalling end-of-response.
    });
}

#[tokio::test]
async fn test_successful_dispatch_round_trip() {
    let (client, server) = duplex(4096);
    spawn_gateway(server, "RESULT=0&RESPMSG=Approved");

    let config = test_config();
    let connector = MockConnector::new(vec![Outcome::Serve(client)]);
    let mut dispatcher = Dispatcher::new(&config, &connector);

    let reply = assert_ok!(dispatcher.dispatch("TRXTYPE[1]=S").await);
    assert_eq!(reply, "RESULT=0&RESPMSG=Approved");
    assert_eq!(connector.attempts(), 1);
    assert_ne!(dispatcher.state(), TransactionState::Error);
}

#[tokio::test]
async fn test_connect_failure_then_success_retries_exactly_once() {
    let (client, server) = duplex(4096);
    spawn_gateway(server, "RESULT=0");

    let config = test_config();
    let connector = MockConnector::new(vec![Outcome::Refuse, Outcome::Serve(client)]);
    let mut dispatcher = Dispatcher::new(&config, &connector);

    let reply = dispatcher.dispatch("TRXTYPE[1]=S").await.unwrap();
    assert_eq!(reply, "RESULT=0");
    assert_eq!(connector.attempts(), 2);
}

#[tokio::test]
async fn test_two_connect_failures_surface_after_single_retry() {
    let config = test_config();
    let connector = MockConnector::new(vec![Outcome::Refuse, Outcome::Refuse]);
    let mut dispatcher = Dispatcher::new(&config, &connector);

    let err = dispatcher.dispatch("TRXTYPE[1]=S").await.unwrap_err();
    assert_eq!(err.kind(), "ConnectionFailed");
    assert_eq!(connector.attempts(), 2);
    assert_eq!(dispatcher.state(), TransactionState::Error);
}

#[tokio::test]
async fn test_write_failure_is_not_retried() {
    let config = test_config();

    // Hand the dispatcher a connection whose writes fail.
    struct BrokenConnector {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Connector for BrokenConnector {
        async fn connect(&self, _config: &GatewayConfig) -> Result<Connection> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(BrokenPipe))
        }
    }

    let broken = BrokenConnector {
        attempts: AtomicUsize::new(0),
    };
    let mut dispatcher = Dispatcher::new(&config, &broken);

    let err = dispatcher.dispatch("TRXTYPE[1]=S").await.unwrap_err();
    assert_eq!(err.kind(), "TransportWriteFailed");
    assert_eq!(broken.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.state(), TransactionState::Error);
}

#[tokio::test(start_paused = true)]
async fn test_late_response_after_timeout_is_discarded() {
    let (client, mut server) = duplex(4096);

    // The gateway answers well after the 1s configured timeout elapses.
    tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        let _ = server.read(&mut buf).await;
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        let _ = server.write_all(b"RESULT=0&RESPMSG=Approved").await;
    });

    let config = test_config();
    let connector = MockConnector::new(vec![Outcome::Serve(client)]);
    let mut dispatcher = Dispatcher::new(&config, &connector);

    let err = dispatcher.dispatch("TRXTYPE[1]=S").await.unwrap_err();
    assert_eq!(err.kind(), "Timeout");
    assert_eq!(dispatcher.state(), TransactionState::Error);
    // The timeout message must warn the caller the outcome is unknown.
    assert!(err.to_string().contains("unknown"));
}

#[tokio::test]
async fn test_peer_gone_before_send_is_a_write_failure() {
    let (client, server) = duplex(4096);
    // The peer disappears before the request is written.
    drop(server);

    let config = test_config();
    let connector = MockConnector::new(vec![Outcome::Serve(client)]);
    let mut dispatcher = Dispatcher::new(&config, &connector);

    let err = dispatcher.dispatch("TRXTYPE[1]=S").await.unwrap_err();
    assert_eq!(err.kind(), "TransportWriteFailed");
    assert_eq!(connector.attempts(), 1);
}

#[test]
fn test_proxy_connect_request_shape() {
    let request = proxy_connect_request("payflowpro.paypal.com", 443);
    assert!(request.starts_with("CONNECT payflowpro.paypal.com:443 HTTP/1.1\r\n"));
    assert!(request.contains("Host: payflowpro.paypal.com:443\r\n"));
    assert!(request.ends_with("\r\n\r\n"));
}

#[test]
fn test_state_display_names() {
    assert_eq!(TransactionState::AwaitingResponse.to_string(), "AwaitingResponse");
    assert_eq!(TransactionState::Error.to_string(), "Error");
}
