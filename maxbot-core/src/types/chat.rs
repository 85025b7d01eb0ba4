//! Chat type of a message recipient.

use serde::{Deserialize, Serialize};

/// Kind of chat a message was sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    /// One-to-one conversation between a user and the bot.
    Dialog,
    /// Group chat.
    #[serde(alias = "group", alias = "supergroup")]
    Chat,
    Channel,
    #[serde(other)]
    Unknown,
}

impl ChatType {
    /// Group chats get one session per participant.
    pub fn is_group(&self) -> bool {
        matches!(self, ChatType::Chat)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::Dialog => "dialog",
            ChatType::Chat => "chat",
            ChatType::Channel => "channel",
            ChatType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_type_aliases() {
        let t: ChatType = serde_json::from_str("\"group\"").unwrap();
        assert_eq!(t, ChatType::Chat);
        let t: ChatType = serde_json::from_str("\"supergroup\"").unwrap();
        assert!(t.is_group());
        let t: ChatType = serde_json::from_str("\"dialog\"").unwrap();
        assert!(!t.is_group());
        let t: ChatType = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(t, ChatType::Unknown);
    }
}
