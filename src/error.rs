//! Error types for the Payflow SDK
//!
//! All SDK-internal failures are represented by [`PayflowError`]. Gateway
//! business outcomes (a declined transaction, a validation rejection) are NOT
//! errors; they arrive as ordinary `RESULT`/`RESPMSG` values on a
//! [`TransactionResponse`](crate::response::TransactionResponse) after a
//! successful protocol round trip.

use thiserror::Error;

/// Result type alias for Payflow operations
pub type Result<T> = std::result::Result<T, PayflowError>;

/// Errors that can occur during a Payflow transaction submission
#[derive(Error, Debug)]
pub enum PayflowError {
    /// Invalid SDK configuration (bad host, port, timeout, credentials shape)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Failed to establish the secure connection to the gateway
    #[error("Connection to gateway failed: {message}")]
    ConnectionFailed {
        /// Underlying connect/TLS failure
        message: String,
    },

    /// Failed to write the full request to an established connection
    #[error("Transport write failed: {message}")]
    TransportWriteFailed {
        /// Underlying write failure
        message: String,
    },

    /// The gateway did not respond within the configured timeout.
    ///
    /// The gateway may have received and processed the request even though
    /// the response was lost; re-query with the same `REQUEST_ID` rather
    /// than resubmitting.
    #[error(
        "Timed out after {timeout_secs}s awaiting gateway response; \
         the transaction outcome is unknown - re-query with the original \
         REQUEST_ID instead of resubmitting"
    )]
    Timeout {
        /// Configured timeout that elapsed
        timeout_secs: u64,
    },

    /// The wire message could not be decoded (bad length tag, truncated field)
    #[error("Malformed wire message: {message}")]
    MalformedWireMessage {
        /// What the decoder choked on
        message: String,
    },

    /// The decoded response is missing or corrupts a mandatory field
    #[error("Malformed gateway response: {message}")]
    MalformedResponse {
        /// What was missing or invalid
        message: String,
    },
}

impl PayflowError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a connection failure error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Create a transport write failure error
    pub fn transport_write_failed(message: impl Into<String>) -> Self {
        Self::TransportWriteFailed {
            message: message.into(),
        }
    }

    /// Create a malformed wire message error
    pub fn malformed_wire_message(message: impl Into<String>) -> Self {
        Self::MalformedWireMessage {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Short stable name for this error kind, used in [`Context`] entries
    ///
    /// [`Context`]: crate::context::Context
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Config",
            Self::ConnectionFailed { .. } => "ConnectionFailed",
            Self::TransportWriteFailed { .. } => "TransportWriteFailed",
            Self::Timeout { .. } => "Timeout",
            Self::MalformedWireMessage { .. } => "MalformedWireMessage",
            Self::MalformedResponse { .. } => "MalformedResponse",
        }
    }
}
