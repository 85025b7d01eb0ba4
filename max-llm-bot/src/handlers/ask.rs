//! `/ask [mode] <question>`: answers from a knowledge graph instead of the chat model.

use std::sync::Arc;

use async_trait::async_trait;
use dispatcher::UpdateHandler;
use maxbot_core::{Bot, ChatAction, Result, Update};
use tracing::{error, info, warn};

use super::{reply, MSG_REQUEST_FAILED};
use crate::graph::{GraphMemory, QueryMode};

const MSG_ASK_USAGE: &str =
    "Usage: /ask [naive|local|global|hybrid|mix|bypass] <question>";
const MSG_NO_ANSWER: &str = "🤷 The knowledge base has no answer to that.";

/// Splits command arguments into an optional leading mode and the question.
/// Without a recognizable mode the whole text is the question and the mode is the default.
pub fn parse_ask_args(args: &str) -> (QueryMode, &str) {
    let args = args.trim();
    if let Some((first, rest)) = args.split_once(char::is_whitespace) {
        if let Ok(mode) = first.parse::<QueryMode>() {
            return (mode, rest.trim());
        }
    } else if args.parse::<QueryMode>().is_ok() {
        // A bare mode with no question.
        return (QueryMode::default(), "");
    }
    (QueryMode::default(), args)
}

/// Queries one knowledge graph and relays the answer.
pub struct AskHandler {
    bot: Arc<dyn Bot>,
    graph: Arc<dyn GraphMemory>,
    graph_id: String,
}

impl AskHandler {
    pub fn new(bot: Arc<dyn Bot>, graph: Arc<dyn GraphMemory>, graph_id: impl Into<String>) -> Self {
        Self {
            bot,
            graph,
            graph_id: graph_id.into(),
        }
    }
}

#[async_trait]
impl UpdateHandler for AskHandler {
    async fn handle(&self, update: &Update) -> Result<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let (mode, question) = parse_ask_args(message.command_args());
        if question.is_empty() {
            return reply(self.bot.as_ref(), message, MSG_ASK_USAGE).await;
        }

        info!(
            graph_id = %self.graph_id,
            mode = %mode,
            question_len = question.len(),
            "step: knowledge query"
        );
        if let Some(chat_id) = message.chat_id() {
            if let Err(e) = self.bot.send_chat_action(chat_id, ChatAction::TypingOn).await {
                warn!(error = %e, chat_id = chat_id, "Failed to send typing action");
            }
        }

        match self.graph.query(&self.graph_id, question, mode).await {
            Ok(answer) if answer.trim().is_empty() => {
                reply(self.bot.as_ref(), message, MSG_NO_ANSWER).await
            }
            Ok(answer) => reply(self.bot.as_ref(), message, &answer).await,
            Err(e) => {
                error!(error = %e, graph_id = %self.graph_id, mode = %mode, "Knowledge query failed");
                reply(self.bot.as_ref(), message, MSG_REQUEST_FAILED).await
            }
        }
    }

    fn name(&self) -> &str {
        "ask"
    }
}
