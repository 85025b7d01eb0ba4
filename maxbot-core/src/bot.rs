//! Transport abstractions.
//!
//! [`Bot`] covers outbound calls (send, edit, delete, actions, callback answers);
//! [`UpdateSource`] is the long-polling side. maxbot-api implements both over HTTP;
//! tests substitute in-memory doubles.

use crate::error::Result;
use crate::types::{
    BotInfo, CallbackAnswer, ChatAction, Message, NewMessage, PollRequest, SendTarget, UpdateBatch,
};
use async_trait::async_trait;

/// Outbound bot operations. Implementations map to a transport (e.g. the MAX Bot API).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Returns the bot's own identity.
    async fn get_me(&self) -> Result<BotInfo>;

    /// Sends a message to a chat or user. Returns the sent message when the transport reports it.
    async fn send_message(&self, target: SendTarget, message: &NewMessage) -> Result<Option<Message>>;

    /// Replaces text/attachments of an already-sent message.
    async fn edit_message(&self, message_id: &str, message: &NewMessage) -> Result<()>;

    async fn delete_message(&self, message_id: &str) -> Result<()>;

    /// Shows an activity indicator (e.g. typing) in a chat.
    async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str, answer: &CallbackAnswer) -> Result<()>;

    /// Sends plain text; shorthand over [`Bot::send_message`].
    async fn send_text(&self, target: SendTarget, text: &str) -> Result<()> {
        self.send_message(target, &NewMessage::text(text)).await?;
        Ok(())
    }
}

/// Source of updates for the polling loop.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Performs one long-poll request. Errors leave the caller's marker unchanged.
    async fn get_updates(&self, request: &PollRequest) -> Result<UpdateBatch>;
}
