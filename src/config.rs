//! Gateway connection configuration
//!
//! [`GatewayConfig`] is an immutable value handed to each submission. The
//! original SDK kept host/port/timeout in process-wide mutable properties;
//! here the configuration is constructed once and cloned into every
//! [`PayflowClient`](crate::client::PayflowClient), so one submission can
//! never observe another submission's mutation.
//!
//! # Examples
//!
//! ```
//! use rust_payflow::config::GatewayConfig;
//!
//! let config = GatewayConfig::new("pilot-payflowpro.paypal.com")
//!     .with_port(443)
//!     .with_timeout_secs(45);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::{PayflowError, Result};
use std::time::Duration;

/// Default gateway port
pub const DEFAULT_PORT: u16 = 443;

/// Default response timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Immutable per-submission gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway host address (e.g., "pilot-payflowpro.paypal.com")
    pub host: String,
    /// Gateway port
    pub port: u16,
    /// Connect/read timeout in seconds
    pub timeout_secs: u64,
    /// Optional forward HTTP proxy host
    pub proxy_host: Option<String>,
    /// Optional forward HTTP proxy port
    pub proxy_port: Option<u16>,
    /// Maximum log level for the diagnostic sink, if the caller wants the
    /// SDK to install one (pass-through only, never consumed by protocol logic)
    pub log_level: Option<tracing::Level>,
}

impl GatewayConfig {
    /// Create a new configuration for the given gateway host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_host: None,
            proxy_port: None,
            log_level: None,
        }
    }

    /// Set the gateway port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the connect/read timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Route the connection through a forward HTTP proxy
    pub fn with_proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.proxy_host = Some(host.into());
        self.proxy_port = Some(port);
        self
    }

    /// Set the diagnostic log level
    pub fn with_log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Get the timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration shape before any connection is attempted
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(PayflowError::config("Gateway host must not be empty"));
        }
        if self.port == 0 {
            return Err(PayflowError::config("Gateway port must be non-zero"));
        }
        if self.timeout_secs == 0 {
            return Err(PayflowError::config("Timeout must be at least 1 second"));
        }
        if self.proxy_host.is_some() != self.proxy_port.is_some() {
            return Err(PayflowError::config(
                "Proxy host and port must be configured together",
            ));
        }
        if let Some(proxy_host) = &self.proxy_host {
            if proxy_host.trim().is_empty() {
                return Err(PayflowError::config("Proxy host must not be empty"));
            }
        }
        Ok(())
    }

    /// Install a `tracing` subscriber at the configured level.
    ///
    /// Returns an error if a global subscriber is already installed. Callers
    /// embedding the SDK into a larger application normally install their own
    /// subscriber and skip this.
    pub fn init_tracing(&self) -> Result<()> {
        let level = self.log_level.unwrap_or(tracing::Level::WARN);
        tracing_subscriber::fmt()
            .with_max_level(level)
            .try_init()
            .map_err(|e| PayflowError::config(format!("Failed to install subscriber: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::new("pilot-payflowpro.paypal.com");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.proxy_host.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = GatewayConfig::new("payflowpro.paypal.com")
            .with_port(8443)
            .with_timeout_secs(10)
            .with_proxy("proxy.corp.example.com", 3128);

        assert_eq!(config.port, 8443);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.proxy_port, Some(3128));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_host() {
        let config = GatewayConfig::new("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = GatewayConfig::new("host").with_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_half_configured_proxy() {
        let mut config = GatewayConfig::new("host");
        config.proxy_host = Some("proxy".to_string());
        assert!(config.validate().is_err());
    }
}
