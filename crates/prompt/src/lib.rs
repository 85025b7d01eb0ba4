//! # Prompt
//!
//! Chat message types and prompt assembly for chat-completion models.
//!
//! ## Format
//!
//! - **System** (optional): fixed instruction, always first
//! - **History**: prior user/assistant turns of the session, oldest first
//! - **Current**: the new user text, always last
//!
//! ## External interactions
//!
//! - **LLM APIs**: [`ChatMessage`] serializes to `{"role": "...", "content": "..."}`, the
//!   element shape of a chat-completions `messages` array.

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with chat-completions `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message (one element of the `messages` array; one turn of a session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Length of `content` in characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Default system instruction when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly assistant in MAX messenger. \
Answer briefly and to the point. Be polite and help users.";

/// Builds the message list for one completion call.
///
/// Order: system (when `system_message` is non-blank) → `history` in order → `user_text`.
/// System entries inside `history` are skipped so the instruction appears exactly once.
pub fn build_chat_messages<'a, H>(
    system_message: Option<&str>,
    history: H,
    user_text: &str,
) -> Vec<ChatMessage>
where
    H: IntoIterator<Item = &'a ChatMessage>,
{
    let mut messages = Vec::new();

    if let Some(system) = system_message.filter(|s| !s.trim().is_empty()) {
        messages.push(ChatMessage::system(system));
    }

    messages.extend(
        history
            .into_iter()
            .filter(|m| m.role != MessageRole::System)
            .cloned(),
    );

    messages.push(ChatMessage::user(user_text));
    messages
}

// Tests live in tests/build_chat_messages_test.rs
