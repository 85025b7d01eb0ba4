//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error for the bot: API status, transport, decoding, handler and config failures.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),
}

impl BotError {
    /// True for failures worth retrying with the same request: network errors, 429 and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            BotError::Transport(_) => true,
            BotError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Shared state (e.g. the session store) could not be read or written.
    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
