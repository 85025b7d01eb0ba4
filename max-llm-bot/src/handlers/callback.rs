//! Button presses.

use std::sync::Arc;

use async_trait::async_trait;
use dispatcher::UpdateHandler;
use maxbot_core::{Bot, CallbackAnswer, Result, Update};
use tracing::info;

/// Answers every callback with a notification echoing its payload.
pub struct CallbackHandler {
    bot: Arc<dyn Bot>,
}

impl CallbackHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl UpdateHandler for CallbackHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(callback) = update.callback.as_ref() else {
            return Ok(());
        };
        let payload = callback.payload.as_deref().unwrap_or("no payload");
        info!(
            user_name = %callback.user.full_name(),
            payload = %payload,
            "step: callback received"
        );
        let answer = CallbackAnswer::notification(format!("Button pressed: {}", payload));
        self.bot.answer_callback(&callback.callback_id, &answer).await
    }

    fn name(&self) -> &str {
        "callback"
    }
}
