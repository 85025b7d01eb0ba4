//! Session key derivation.

use std::fmt;

use maxbot_core::{ChatType, Message};

/// Identifies one conversation.
///
/// - one-to-one chat: `"<chat_id>"`
/// - group chat: `"<chat_id>:<user_id>"` (each participant has their own history)
/// - no chat id: `"user:<user_id>"`
///
/// The three shapes never overlap, so distinct conversations never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derives the key from chat id, sender id and chat type.
    /// Returns `None` for a group message without a sender, or when both ids are missing.
    pub fn derive(chat_id: Option<i64>, user_id: Option<i64>, chat_type: Option<ChatType>) -> Option<Self> {
        let is_group = chat_type.is_some_and(|t| t.is_group());
        match (chat_id, user_id) {
            (Some(chat), Some(user)) if is_group => Some(Self(format!("{}:{}", chat, user))),
            (Some(_), None) if is_group => None,
            (Some(chat), _) => Some(Self(chat.to_string())),
            (None, Some(user)) => Some(Self(format!("user:{}", user))),
            (None, None) => None,
        }
    }

    pub fn from_message(message: &Message) -> Option<Self> {
        Self::derive(message.chat_id(), message.user_id(), message.chat_type())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
