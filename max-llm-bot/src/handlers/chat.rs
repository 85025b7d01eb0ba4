//! Default text handler: forwards the message to the LLM and relays the reply.

use std::sync::Arc;

use async_trait::async_trait;
use dispatcher::UpdateHandler;
use llm_client::LlmGateway;
use maxbot_core::{Bot, ChatAction, Result, Update};
use session::SessionKey;
use tracing::{debug, error, info, instrument, warn};

use super::{reply, MSG_RATE_LIMITED, MSG_REQUEST_FAILED};
use crate::rate_limit::LlmRateLimiter;
use crate::retry::RetryPolicy;

/// Any text that no command claimed goes to the LLM in the context of the sender's session.
///
/// Steps: rate-limit permit, typing indicator (best effort), gateway call with bounded retry on
/// transient errors, then the reply or a generic failure message.
pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    gateway: Arc<LlmGateway>,
    limiter: Arc<LlmRateLimiter>,
    retry: RetryPolicy,
}

impl ChatHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        gateway: Arc<LlmGateway>,
        limiter: Arc<LlmRateLimiter>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            bot,
            gateway,
            limiter,
            retry,
        }
    }
}

#[async_trait]
impl UpdateHandler for ChatHandler {
    #[instrument(skip(self, update))]
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let Some(user) = message.from_user() else {
            return Ok(());
        };
        let text = message.text().unwrap_or("").trim();
        if text.is_empty() {
            return Ok(());
        }
        let Some(key) = SessionKey::from_message(message) else {
            debug!("No session key for message, skipped");
            return Ok(());
        };

        info!(
            user = %user.mention(),
            session_key = %key,
            text_len = text.len(),
            "step: message for LLM"
        );

        if !self.limiter.try_acquire() {
            warn!(
                session_key = %key,
                quota_per_minute = self.limiter.quota_per_minute(),
                "LLM rate limit reached, request refused"
            );
            return reply(self.bot.as_ref(), message, MSG_RATE_LIMITED).await;
        }

        if let Some(chat_id) = message.chat_id() {
            if let Err(e) = self.bot.send_chat_action(chat_id, ChatAction::TypingOn).await {
                warn!(error = %e, chat_id = chat_id, "Failed to send typing action");
            }
        }

        match self.retry.run(|| self.gateway.ask(&key, text)).await {
            Ok(answer) => {
                let preview: String = answer.chars().take(100).collect();
                info!(reply_len = answer.len(), preview = %preview, "step: LLM reply received");
                reply(self.bot.as_ref(), message, &answer).await
            }
            Err(e) => {
                error!(
                    error = %e,
                    transient = e.is_transient(),
                    session_key = %key,
                    "LLM request failed"
                );
                reply(self.bot.as_ref(), message, MSG_REQUEST_FAILED).await
            }
        }
    }

    fn name(&self) -> &str {
        "chat"
    }
}
