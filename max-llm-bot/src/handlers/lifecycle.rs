//! Bot lifecycle updates: started/stopped by a user, added to/removed from a chat.

use std::sync::Arc;

use async_trait::async_trait;
use dispatcher::UpdateHandler;
use maxbot_core::{Bot, Result, SendTarget, Update, UpdateType};
use tracing::info;

/// Welcomes users who start the bot and greets chats it is added to; stop/remove are logged.
pub struct LifecycleHandler {
    bot: Arc<dyn Bot>,
}

impl LifecycleHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// Update types this handler expects.
    pub fn update_types() -> [UpdateType; 4] {
        [
            UpdateType::BotStarted,
            UpdateType::BotStopped,
            UpdateType::BotAdded,
            UpdateType::BotRemoved,
        ]
    }
}

#[async_trait]
impl UpdateHandler for LifecycleHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(user) = update.user.as_ref() else {
            return Ok(());
        };
        let user_name = user.full_name();

        match update.update_type {
            UpdateType::BotStarted => {
                info!(user_name = %user_name, user_id = user.user_id, "step: bot started by user");
                let text = format!(
                    "👋 Welcome, {}!\n\n\
                     Thanks for starting the bot. I run on GigaChat and I'm ready to help.\n\n\
                     Send /help to see the available commands.",
                    user_name
                );
                self.bot.send_text(SendTarget::User(user.user_id), &text).await
            }
            UpdateType::BotAdded => {
                info!(chat_id = ?update.chat_id, user_name = %user_name, "step: bot added to chat");
                let Some(chat_id) = update.chat_id else {
                    return Ok(());
                };
                let text = format!(
                    "👋 Hello everyone! Thanks for adding me, {}!\n\n\
                     I run on GigaChat and can answer your questions.\n\
                     Send /help to see what I can do.",
                    user_name
                );
                self.bot.send_text(SendTarget::Chat(chat_id), &text).await
            }
            UpdateType::BotStopped => {
                info!(user_name = %user_name, user_id = user.user_id, "step: bot stopped by user");
                Ok(())
            }
            UpdateType::BotRemoved => {
                info!(chat_id = ?update.chat_id, user_name = %user_name, "step: bot removed from chat");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "lifecycle"
    }
}
