//! HTTP client for the MAX Bot API.
//!
//! The token travels in the `Authorization` header on every request, never in the query string.
//! Non-2xx responses become [`BotError::Api`], network failures [`BotError::Transport`],
//! unparseable bodies [`BotError::Decode`].

use std::time::Duration;

use async_trait::async_trait;
use maxbot_core::{
    Bot, BotError, BotInfo, CallbackAnswer, ChatAction, Message, NewMessage, PollRequest, Result,
    SendTarget, Update, UpdateBatch, UpdateSource,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::MaxApiConfig;

pub const DEFAULT_API_URL: &str = "https://platform-api.max.ru";

/// Added on top of the long-poll timeout so the server answers before the HTTP client gives up.
const POLL_GRACE_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_PREVIEW_LEN: usize = 300;

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    updates: Vec<serde_json::Value>,
    marker: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    message: Option<Message>,
}

/// `{"success": bool, "message": "..."}` returned by mutating endpoints.
#[derive(Debug, Deserialize)]
struct SimpleResult {
    #[serde(default = "default_success")]
    success: bool,
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Extracts a readable error from an API error body; falls back to a truncated raw body.
fn api_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        match (parsed.code, parsed.message) {
            (Some(code), Some(message)) => return format!("{}: {}", code, message),
            (None, Some(message)) => return message,
            (Some(code), None) => return code,
            (None, None) => {}
        }
    }
    body.chars().take(ERROR_BODY_PREVIEW_LEN).collect()
}

/// MAX Bot API client. Cheap to clone (shares the connection pool).
#[derive(Clone)]
pub struct MaxApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl MaxApiClient {
    /// Client against a custom base URL (tests, proxies).
    pub fn with_base_url(token: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| BotError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &MaxApiConfig) -> Result<Self> {
        Self::with_base_url(config.bot_token.clone(), config.api_url().to_string())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request with auth and decodes a JSON body of type `T`.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, op: &str) -> Result<T> {
        let response = request
            .header(AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(|e| BotError::Transport(format!("{}: {}", op, e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::Transport(format!("{}: {}", op, e)))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            return Err(BotError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| BotError::Decode(format!("{}: {}", op, e)))
    }

    /// Like [`Self::execute`] for endpoints answering `{"success": ...}`; `success: false` is an error.
    async fn execute_simple(&self, request: RequestBuilder, op: &str) -> Result<()> {
        let result: SimpleResult = self.execute(request, op).await?;
        if !result.success {
            return Err(BotError::Api {
                status: 200,
                message: result.message.unwrap_or_else(|| format!("{} was not successful", op)),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MaxApiClient {
    #[instrument(skip(self))]
    async fn get_me(&self) -> Result<BotInfo> {
        let request = self
            .client
            .get(self.url("/me"))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        self.execute(request, "get_me").await
    }

    #[instrument(skip(self, message), fields(text_len = message.text.len()))]
    async fn send_message(&self, target: SendTarget, message: &NewMessage) -> Result<Option<Message>> {
        let mut query: Vec<(&str, String)> = vec![(
            "disable_link_preview",
            message.disable_link_preview.to_string(),
        )];
        match target {
            SendTarget::Chat(id) => query.push(("chat_id", id.to_string())),
            SendTarget::User(id) => query.push(("user_id", id.to_string())),
        }

        let request = self
            .client
            .post(self.url("/messages"))
            .query(&query)
            .json(message)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        let response: SendMessageResponse = self.execute(request, "send_message").await?;

        info!(
            send_target = ?target,
            message_id = response.message.as_ref().map(|m| m.message_id()).unwrap_or(""),
            "Message sent"
        );
        Ok(response.message)
    }

    #[instrument(skip(self, message))]
    async fn edit_message(&self, message_id: &str, message: &NewMessage) -> Result<()> {
        let request = self
            .client
            .put(self.url("/messages"))
            .query(&[("message_id", message_id)])
            .json(message)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        self.execute_simple(request, "edit_message").await
    }

    #[instrument(skip(self))]
    async fn delete_message(&self, message_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url("/messages"))
            .query(&[("message_id", message_id)])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        self.execute_simple(request, "delete_message").await
    }

    #[instrument(skip(self))]
    async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/chats/{}/actions", chat_id)))
            .json(&serde_json::json!({ "action": action }))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        self.execute_simple(request, "send_chat_action").await
    }

    #[instrument(skip(self, answer))]
    async fn answer_callback(&self, callback_id: &str, answer: &CallbackAnswer) -> Result<()> {
        let request = self
            .client
            .post(self.url("/answers"))
            .query(&[("callback_id", callback_id)])
            .json(answer)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        self.execute_simple(request, "answer_callback").await
    }
}

#[async_trait]
impl UpdateSource for MaxApiClient {
    #[instrument(skip(self, request), fields(marker = ?request.marker))]
    async fn get_updates(&self, request: &PollRequest) -> Result<UpdateBatch> {
        let mut query: Vec<(&str, String)> = vec![
            ("limit", request.limit.to_string()),
            ("timeout", request.timeout_secs.to_string()),
        ];
        if let Some(marker) = request.marker {
            query.push(("marker", marker.to_string()));
        }
        if let Some(types) = request.types_param() {
            query.push(("types", types));
        }

        let http_request = self
            .client
            .get(self.url("/updates"))
            .query(&query)
            .timeout(Duration::from_secs(
                u64::from(request.timeout_secs) + POLL_GRACE_SECS,
            ));
        let response: UpdatesResponse = self.execute(http_request, "get_updates").await?;

        let mut updates = Vec::with_capacity(response.updates.len());
        for raw in response.updates {
            match serde_json::from_value::<Update>(raw) {
                Ok(update) => updates.push(update),
                Err(e) => warn!(error = %e, "Skipping undecodable update"),
            }
        }

        debug!(
            count = updates.len(),
            next_marker = ?response.marker,
            "Polled updates"
        );

        Ok(UpdateBatch {
            updates,
            marker: response.marker,
        })
    }
}
