//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait, the GigaChat implementation, the [`LlmError`] taxonomy
//! (transient vs terminal) and [`LlmGateway`], which ties a client to a session store.

use async_trait::async_trait;
use prompt::ChatMessage;

mod config;
mod error;
mod gateway;
mod gigachat;

pub use config::{
    EnvLlmConfig, LlmConfig, DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SCOPE,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::LlmError;
pub use gateway::LlmGateway;
pub use gigachat::GigaChatClient;

/// Chat-completion interface: one reply for a list of messages (system/user/assistant).
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;

    /// Model name, for logs.
    fn model(&self) -> &str;
}

/// Masks a secret for logging: first 7 and last 4 characters; "***" when 11 characters or fewer.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("12345678901"), "***");
        assert_eq!(mask_token("Y2xpZW50OnNlY3JldA=="), "Y2xpZW5***dA==");
    }
}
