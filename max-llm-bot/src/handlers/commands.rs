//! `/start`, `/help`, `/clear` and `/info`.

use std::sync::Arc;

use async_trait::async_trait;
use dispatcher::UpdateHandler;
use maxbot_core::{Bot, Result, Update};
use session::{SessionKey, SessionStore};
use tracing::{debug, info};

use super::{reply, session_error};

const MSG_HISTORY_CLEARED: &str = "✅ Conversation history cleared!";

fn greeting(user_name: &str, knowledge_enabled: bool) -> String {
    let ask_line = if knowledge_enabled {
        "/ask [mode] <question> - Ask the knowledge base\n"
    } else {
        ""
    };
    format!(
        "👋 Hello, {}!\n\n\
         I'm a GigaChat-powered bot. I can answer your questions and keep up a conversation.\n\n\
         Available commands:\n\
         /start, /help - Show this message\n\
         /clear - Clear conversation history\n\
         /info - Show session info\n\
         {}\n\
         Just write me something and I'll reply! 💬",
        user_name, ask_line
    )
}

/// Greets the sender and lists the commands.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
    knowledge_enabled: bool,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            knowledge_enabled: false,
        }
    }

    /// Also advertise `/ask`.
    pub fn with_knowledge(mut self, enabled: bool) -> Self {
        self.knowledge_enabled = enabled;
        self
    }
}

#[async_trait]
impl UpdateHandler for StartHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let user_name = message
            .from_user()
            .map(|u| u.full_name())
            .unwrap_or_else(|| "Unknown".to_string());
        info!(user_name = %user_name, "step: start command");
        reply(self.bot.as_ref(), message, &greeting(&user_name, self.knowledge_enabled)).await
    }

    fn name(&self) -> &str {
        "start"
    }
}

/// Empties the sender's session.
pub struct ClearHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn SessionStore>,
}

impl ClearHandler {
    pub fn new(bot: Arc<dyn Bot>, store: Arc<dyn SessionStore>) -> Self {
        Self { bot, store }
    }
}

#[async_trait]
impl UpdateHandler for ClearHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        if message.from_user().is_none() {
            return Ok(());
        }
        let Some(key) = SessionKey::from_message(message) else {
            debug!("No session key for message, clear skipped");
            return Ok(());
        };

        self.store.clear(&key).await.map_err(session_error)?;
        info!(session_key = %key, "step: session cleared");
        reply(self.bot.as_ref(), message, MSG_HISTORY_CLEARED).await
    }

    fn name(&self) -> &str {
        "clear"
    }
}

/// Reports session counters for the sender.
pub struct InfoHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn SessionStore>,
}

impl InfoHandler {
    pub fn new(bot: Arc<dyn Bot>, store: Arc<dyn SessionStore>) -> Self {
        Self { bot, store }
    }
}

#[async_trait]
impl UpdateHandler for InfoHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let Some(user) = message.from_user() else {
            return Ok(());
        };
        let Some(key) = SessionKey::from_message(message) else {
            return Ok(());
        };

        let stats = self.store.stats(&key).await.map_err(session_error)?;
        let session_count = self.store.session_count().await.map_err(session_error)?;
        let text = format!(
            "ℹ️ Session info:\n\n\
             👤 User: {}\n\
             🆔 ID: {}\n\
             💬 Messages in history: {}\n\
             🔁 Total turns: {}\n\
             🔢 Approx. tokens: {}\n\
             🔑 Session ID: {}\n\n\
             Active sessions: {}",
            user.full_name(),
            user.user_id,
            stats.user_turns,
            stats.turns,
            stats.approx_tokens,
            key,
            session_count
        );
        reply(self.bot.as_ref(), message, &text).await
    }

    fn name(&self) -> &str {
        "info"
    }
}
