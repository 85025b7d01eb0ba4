//! GigaChat implementation of [`LlmClient`].
//!
//! Two endpoints:
//! - OAuth (`POST {auth_url}`): Basic credentials + `RqUID` + form `scope` → access token with
//!   `expires_at` in milliseconds. The token is cached and refreshed shortly before expiry.
//! - Chat (`POST {base_url}/chat/completions`): Bearer token, `{model, messages}` →
//!   `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use prompt::ChatMessage;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::{mask_token, LlmClient};

/// Refresh the token this long before it expires.
const TOKEN_REFRESH_MARGIN_MS: i64 = 60_000;
const ERROR_BODY_PREVIEW_LEN: usize = 300;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    /// Unix time in milliseconds.
    expires_at: i64,
}

impl AccessToken {
    fn is_fresh(&self, now_ms: i64) -> bool {
        self.expires_at.saturating_sub(TOKEN_REFRESH_MARGIN_MS) > now_ms
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_at: i64,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// GigaChat API client with cached OAuth token.
pub struct GigaChatClient {
    client: Client,
    credentials: String,
    scope: String,
    model: String,
    auth_url: String,
    base_url: String,
    token: Mutex<Option<AccessToken>>,
}

impl GigaChatClient {
    /// Builds the client from config. TLS verification is skipped when `verify_ssl()` is false.
    pub fn new(config: &dyn LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .danger_accept_invalid_certs(!config.verify_ssl())
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            model = %config.model(),
            scope = %config.scope(),
            base_url = %config.base_url(),
            credentials = %mask_token(config.credentials()),
            verify_ssl = config.verify_ssl(),
            "GigaChat client initialized"
        );

        Ok(Self {
            client,
            credentials: config.credentials().to_string(),
            scope: config.scope().to_string(),
            model: config.model().to_string(),
            auth_url: config.auth_url().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Returns a cached token, fetching a new one when missing or about to expire.
    async fn access_token(&self) -> Result<String, LlmError> {
        let mut cached = self.token.lock().await;
        let now_ms = Utc::now().timestamp_millis();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now_ms)) {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<AccessToken, LlmError> {
        info!(
            auth_url = %self.auth_url,
            credentials = %mask_token(&self.credentials),
            "step: GigaChat OAuth token request"
        );
        let response = self
            .client
            .post(&self.auth_url)
            .header(AUTHORIZATION, format!("Basic {}", self.credentials))
            .header("RqUID", Uuid::new_v4().to_string())
            .header(ACCEPT, "application/json")
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_preview(response).await;
            return Err(LlmError::from_auth_status(status.as_u16(), message));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("token response: {}", e)))?;
        debug!(expires_at = body.expires_at, "GigaChat token received");
        Ok(AccessToken {
            value: body.access_token,
            expires_at: body.expires_at,
        })
    }

    /// Drops the cached token so the next call re-authenticates.
    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }
}

async fn error_preview(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    body.chars().take(ERROR_BODY_PREVIEW_LEN).collect()
}

#[async_trait]
impl LlmClient for GigaChatClient {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let token = self.access_token().await?;
        info!(
            model = %self.model,
            message_count = messages.len(),
            "GigaChat chat_completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&token)
            .header(ACCEPT, "application/json")
            .json(&CompletionRequest {
                model: &self.model,
                messages: &messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_preview(response).await;
            let err = LlmError::from_completion_status(status.as_u16(), message);
            if matches!(err, LlmError::TokenExpired) {
                warn!("GigaChat rejected access token, dropping cached token");
                self.invalidate_token().await;
            }
            return Err(err);
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("completion response: {}", e)))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(LlmError::InvalidResponse("empty completion".to_string()));
        }

        info!(reply_len = content.len(), "GigaChat chat_completion done");
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_freshness_margin() {
        let token = AccessToken {
            value: "t".to_string(),
            expires_at: 1_000_000,
        };
        assert!(token.is_fresh(1_000_000 - TOKEN_REFRESH_MARGIN_MS - 1));
        assert!(!token.is_fresh(1_000_000 - TOKEN_REFRESH_MARGIN_MS));
        assert!(!token.is_fresh(2_000_000));
    }

    #[test]
    fn test_token_with_extreme_expiry_is_stale() {
        let token = AccessToken {
            value: "t".to_string(),
            expires_at: i64::MIN,
        };
        assert!(!token.is_fresh(0));
        assert!(!token.is_fresh(i64::MIN));
    }
}
