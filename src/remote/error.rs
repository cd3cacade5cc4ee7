// ABOUTME: Error type for remote API calls, classified for retry handling.
// ABOUTME: Rate limits and transport failures are retryable; other statuses are terminal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service signalled rate limiting (HTTP 403 or 429).
    #[error("rate limited by the remote API (HTTP {status})")]
    RateLimited { status: u16 },

    /// Any other non-success response.
    #[error("remote API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    /// Transport failures are worth retrying, except decode errors: a
    /// response that arrived but would not parse will not parse next time.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(source) => !source.is_decode(),
            _ => false,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RateLimited { status } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(source) => source.status().map(|s| s.as_u16()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
