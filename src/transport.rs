//! Transport and transaction dispatch
//!
//! One submission drives one [`Dispatcher`] through the lifecycle
//! `Idle → Composing → Connecting → Sending → AwaitingResponse → Decoding →
//! Done`, with `Error` reachable from every network-facing state. Each
//! submission owns its own connection; the connection is dropped (closed) on
//! every exit path, success or failure, and is never pooled or reused.
//!
//! Retry policy: only a transient connection-establishment failure is
//! retried, exactly once, with a fresh connection attempt. Write, await, and
//! decode failures surface immediately: retrying after the request may have
//! reached the gateway risks a duplicate financial transaction.
//!
//! The [`Connector`] trait is the seam between the dispatch logic and the
//! actual network: production uses [`TlsConnector`] (TLS over TCP, optional
//! forward HTTP proxy via CONNECT), tests plug in in-memory streams.

use crate::config::GatewayConfig;
use crate::{PayflowError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// States of one transaction submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Nothing submitted yet
    Idle,
    /// Serializing the contributor tree
    Composing,
    /// Establishing the secure connection
    Connecting,
    /// Writing the wire message
    Sending,
    /// Blocked on the gateway's reply, bounded by the configured timeout
    AwaitingResponse,
    /// Decoding and decomposing the reply
    Decoding,
    /// Typed responses and context are ready
    Done,
    /// A submission-fatal SDK error occurred; the kind is on the error itself
    Error,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionState::Idle => "Idle",
            TransactionState::Composing => "Composing",
            TransactionState::Connecting => "Connecting",
            TransactionState::Sending => "Sending",
            TransactionState::AwaitingResponse => "AwaitingResponse",
            TransactionState::Decoding => "Decoding",
            TransactionState::Done => "Done",
            TransactionState::Error => "Error",
        };
        f.write_str(name)
    }
}

/// Object-safe byte stream the dispatcher talks through
pub trait GatewayStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> GatewayStream for T {}

/// An established, submission-scoped connection
pub type Connection = Box<dyn GatewayStream>;

/// Opens one secure connection per submission
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a connection to the configured gateway
    async fn connect(&self, config: &GatewayConfig) -> Result<Connection>;
}

/// Production connector: TCP, optional forward-proxy CONNECT tunnel, then TLS
#[derive(Debug, Default, Clone, Copy)]
pub struct TlsConnector;

impl TlsConnector {
    fn tls_config() -> Arc<rustls::ClientConfig> {
        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Arc::new(
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth(),
        )
    }

    async fn open_tcp(config: &GatewayConfig) -> Result<TcpStream> {
        let (host, port) = match (&config.proxy_host, config.proxy_port) {
            (Some(proxy), Some(proxy_port)) => (proxy.as_str(), proxy_port),
            _ => (config.host.as_str(), config.port),
        };
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| PayflowError::connection_failed(format!("{}:{}: {}", host, port, e)))?;

        if config.proxy_host.is_some() {
            tunnel_through_proxy(stream, config).await
        } else {
            Ok(stream)
        }
    }
}

#[async_trait]
impl Connector for TlsConnector {
    async fn connect(&self, config: &GatewayConfig) -> Result<Connection> {
        let deadline = config.timeout();
        let stream = timeout(deadline, Self::open_tcp(config))
            .await
            .map_err(|_| {
                PayflowError::connection_failed(format!(
                    "connect to {}:{} timed out",
                    config.host, config.port
                ))
            })??;

        let server_name = rustls::pki_types::ServerName::try_from(config.host.clone())
            .map_err(|e| PayflowError::config(format!("Invalid gateway host name: {}", e)))?;
        let connector = tokio_rustls::TlsConnector::from(Self::tls_config());
        let tls = timeout(deadline, connector.connect(server_name, stream))
            .await
            .map_err(|_| PayflowError::connection_failed("TLS handshake timed out"))?
            .map_err(|e| PayflowError::connection_failed(format!("TLS handshake failed: {}", e)))?;

        tracing::debug!(host = %config.host, port = config.port, "secure connection established");
        Ok(Box::new(tls))
    }
}

/// CONNECT request line for a forward HTTP proxy
fn proxy_connect_request(host: &str, port: u16) -> String {
    format!(
        "CONNECT {host}:{port} HTTP/1.1\r\nHost: {host}:{port}\r\n\r\n",
        host = host,
        port = port
    )
}

async fn tunnel_through_proxy(mut stream: TcpStream, config: &GatewayConfig) -> Result<TcpStream> {
    let request = proxy_connect_request(&config.host, config.port);
    stream
        .write_all(request.as_bytes())
        .await
        .map_err(|e| PayflowError::connection_failed(format!("proxy CONNECT write: {}", e)))?;

    // Read the proxy's response headers up to the blank line.
    let mut response = Vec::new();
    let mut byte = [0u8; 1];
    while !response.ends_with(b"\r\n\r\n") {
        let n = stream
            .read(&mut byte)
            .await
            .map_err(|e| PayflowError::connection_failed(format!("proxy CONNECT read: {}", e)))?;
        if n == 0 {
            return Err(PayflowError::connection_failed(
                "proxy closed the connection during CONNECT",
            ));
        }
        response.push(byte[0]);
        if response.len() > 8192 {
            return Err(PayflowError::connection_failed(
                "proxy CONNECT response exceeded 8 KiB",
            ));
        }
    }

    let status_line = String::from_utf8_lossy(&response);
    let status_line = status_line.lines().next().unwrap_or_default();
    if !status_line.contains(" 200 ") && !status_line.ends_with(" 200") {
        return Err(PayflowError::connection_failed(format!(
            "proxy refused CONNECT: {}",
            status_line
        )));
    }
    Ok(stream)
}

/// Drives one submission's network phases through the state machine
pub struct Dispatcher<'a> {
    config: &'a GatewayConfig,
    connector: &'a dyn Connector,
    state: TransactionState,
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("state", &self.state)
            .field("host", &self.config.host)
            .finish()
    }
}

impl<'a> Dispatcher<'a> {
    /// Create an idle dispatcher for one submission
    pub fn new(config: &'a GatewayConfig, connector: &'a dyn Connector) -> Self {
        Self {
            config,
            connector,
            state: TransactionState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub(crate) fn transition(&mut self, next: TransactionState) {
        tracing::debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// Connect, send the wire message, and await the raw reply.
    ///
    /// The connection lives only inside this call; all exit paths drop it.
    pub async fn dispatch(&mut self, wire: &str) -> Result<String> {
        self.transition(TransactionState::Connecting);
        let mut conn = match self.connect_with_retry().await {
            Ok(conn) => conn,
            Err(e) => {
                self.transition(TransactionState::Error);
                return Err(e);
            }
        };

        self.transition(TransactionState::Sending);
        if let Err(e) = self.send(&mut conn, wire).await {
            self.transition(TransactionState::Error);
            return Err(e);
        }

        self.transition(TransactionState::AwaitingResponse);
        match self.receive(&mut conn).await {
            Ok(reply) => {
                tracing::debug!(bytes = reply.len(), "received gateway reply");
                Ok(reply)
            }
            Err(e) => {
                // Dropping the connection here discards any late reply.
                self.transition(TransactionState::Error);
                Err(e)
            }
        }
    }

    async fn connect_with_retry(&self) -> Result<Connection> {
        match self.connector.connect(self.config).await {
            Ok(conn) => Ok(conn),
            Err(first @ PayflowError::ConnectionFailed { .. }) => {
                tracing::warn!(error = %first, "connection attempt failed, retrying once");
                self.connector.connect(self.config).await.map_err(|e| {
                    PayflowError::connection_failed(format!("retry also failed: {}", e))
                })
            }
            Err(other) => Err(other),
        }
    }

    async fn send(&self, conn: &mut Connection, wire: &str) -> Result<()> {
        let write = async {
            conn.write_all(wire.as_bytes()).await?;
            conn.flush().await
        };
        timeout(self.config.timeout(), write)
            .await
            .map_err(|_| PayflowError::transport_write_failed("write timed out"))?
            .map_err(|e| PayflowError::transport_write_failed(e.to_string()))
    }

    async fn receive(&self, conn: &mut Connection) -> Result<String> {
        let mut buf = Vec::new();
        match timeout(self.config.timeout(), conn.read_to_end(&mut buf)).await {
            Err(_) => Err(PayflowError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }),
            Ok(Err(e)) => Err(PayflowError::connection_failed(format!(
                "connection lost while awaiting response: {}",
                e
            ))),
            Ok(Ok(_)) => String::from_utf8(buf).map_err(|_| {
                PayflowError::malformed_response("gateway reply is not valid UTF-8")
            }),
        }
    }
}

#[cfg(test)]
mod tests;
