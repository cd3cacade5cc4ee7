// ABOUTME: Progress reporting for deployment runs over a forward-only channel.
// ABOUTME: Producers emit timestamped entries; a single consumer renders them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A single progress event from a deployment run.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

/// Cloneable sending half of the progress stream.
///
/// Entries flow one way: emitters never wait on the consumer, and a
/// consumer that went away turns emission into a no-op instead of an
/// error.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    tx: mpsc::UnboundedSender<LogEntry>,
}

impl ProgressLog {
    /// Create the log together with its receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LogEntry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Log that discards every entry, for runs without progress output.
    pub fn sink() -> Self {
        let (log, _rx) = Self::channel();
        log
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Severity::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message.into());
    }

    fn emit(&self, severity: Severity, message: String) {
        tracing::debug!(severity = %severity, "{}", message);
        let entry = LogEntry {
            at: Utc::now(),
            severity,
            message,
        };
        // A dropped receiver means the run is shutting down.
        let _ = self.tx.send(entry);
    }
}
