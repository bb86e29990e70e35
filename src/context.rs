//! Per-submission SDK error context
//!
//! [`Context`] collects SDK-internal problems (bad configuration, transport
//! failures, codec errors) that occur during one transaction submission. It is
//! created fresh for each submission, appended to during composition,
//! transport, and decomposition, and read by the caller afterwards.
//!
//! A gateway decline is NOT recorded here: a decline is a successful protocol
//! round trip carrying a non-approval business result, delivered through
//! [`TransactionResponse`](crate::response::TransactionResponse).

use crate::PayflowError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Context`] entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Verbose diagnostic detail
    Debug,
    /// Informational note (e.g., unclaimed vendor-specific response keys)
    Info,
    /// Recoverable anomaly
    Warn,
    /// Submission-fatal SDK error
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One recorded SDK-internal event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Severity of the event
    pub severity: Severity,
    /// Stable kind name (e.g., "ConnectionFailed", "UnclaimedField")
    pub kind: String,
    /// Human-readable detail
    pub message: String,
}

/// Append-only log of SDK-internal events for one submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    entries: Vec<ContextEntry>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn record(&mut self, severity: Severity, kind: impl Into<String>, message: impl Into<String>) {
        let entry = ContextEntry {
            severity,
            kind: kind.into(),
            message: message.into(),
        };
        match entry.severity {
            Severity::Error => tracing::error!(kind = %entry.kind, "{}", entry.message),
            Severity::Warn => tracing::warn!(kind = %entry.kind, "{}", entry.message),
            Severity::Info => tracing::info!(kind = %entry.kind, "{}", entry.message),
            Severity::Debug => tracing::debug!(kind = %entry.kind, "{}", entry.message),
        }
        self.entries.push(entry);
    }

    /// Append a submission-fatal SDK error
    pub fn record_error(&mut self, error: &PayflowError) {
        self.record(Severity::Error, error.kind(), error.to_string());
    }

    /// Number of entries at [`Severity::Error`]
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }

    /// Whether any submission-fatal error was recorded
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// All recorded entries, in recording order
    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Human-readable rendering of all entries, one per line
    pub fn as_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("[{}] {}: {}", e.severity, e.kind, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
