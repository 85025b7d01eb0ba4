//! LLM error taxonomy.
//!
//! Every failure is either transient (worth retrying later with the same input) or terminal.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request timed out: {0}")]
    Timeout(String),

    #[error("LLM connection error: {0}")]
    Connection(String),

    #[error("LLM rate limited: {0}")]
    RateLimited(String),

    #[error("LLM server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Completion call rejected the cached access token; it has been dropped.
    #[error("LLM access token expired")]
    TokenExpired,

    /// OAuth rejected the credentials.
    #[error("LLM authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("LLM quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("LLM request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("LLM config error: {0}")]
    Config(String),
}

impl LlmError {
    /// True for timeouts, connection errors, 429, 5xx and an expired access token.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout(_)
                | LlmError::Connection(_)
                | LlmError::RateLimited(_)
                | LlmError::Server { .. }
                | LlmError::TokenExpired
        )
    }

    /// Maps a non-2xx completion response to an error.
    pub fn from_completion_status(status: u16, message: String) -> Self {
        match status {
            401 => LlmError::TokenExpired,
            402 => LlmError::QuotaExceeded(message),
            429 => LlmError::RateLimited(message),
            s if s >= 500 => LlmError::Server { status, message },
            _ => LlmError::Rejected { status, message },
        }
    }

    /// Maps a non-2xx OAuth response to an error.
    pub fn from_auth_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => LlmError::Auth { status, message },
            429 => LlmError::RateLimited(message),
            s if s >= 500 => LlmError::Server { status, message },
            _ => LlmError::Rejected { status, message },
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            LlmError::from_completion_status(status.as_u16(), e.to_string())
        } else {
            LlmError::Connection(e.to_string())
        }
    }
}
