//! Bot handlers, in registration order: commands, knowledge `/ask`, default text → LLM,
//! callbacks, lifecycle updates.

mod ask;
mod callback;
mod chat;
mod commands;
mod lifecycle;

pub use ask::{parse_ask_args, AskHandler};
pub use callback::CallbackHandler;
pub use chat::ChatHandler;
pub use commands::{ClearHandler, InfoHandler, StartHandler};
pub use lifecycle::LifecycleHandler;

use maxbot_core::{Bot, BotError, HandlerError, Message, Result};
use tracing::warn;

// --- User-facing fallback messages ---
pub const MSG_REQUEST_FAILED: &str =
    "😔 Sorry, something went wrong while processing your request. Please try again later.";
pub const MSG_RATE_LIMITED: &str =
    "⏳ Too many requests right now. Please try again in a minute.";

/// Sends `text` back where `message` came from: the chat, else the sender directly.
pub(crate) async fn reply(bot: &dyn Bot, message: &Message, text: &str) -> Result<()> {
    match message.reply_target() {
        Some(target) => bot.send_text(target, text).await,
        None => {
            warn!(message_id = %message.message_id(), "Message has neither chat nor sender, reply dropped");
            Ok(())
        }
    }
}

/// Wraps a session store failure as a handler error.
pub(crate) fn session_error(e: anyhow::Error) -> BotError {
    BotError::Handler(HandlerError::State(format!("session store: {}", e)))
}
