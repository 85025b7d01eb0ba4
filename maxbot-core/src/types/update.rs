//! Update envelope delivered by the polling endpoint.

use serde::{Deserialize, Serialize};

use super::{callback::Callback, message::Message, user::User};

/// Discriminator of an [`Update`]. Unrecognized values decode to [`UpdateType::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    MessageCreated,
    MessageEdited,
    MessageRemoved,
    MessageCallback,
    BotStarted,
    BotStopped,
    BotAdded,
    BotRemoved,
    UserAdded,
    UserRemoved,
    ChatTitleChanged,
    MessageChatCreated,
    #[default]
    #[serde(other)]
    Unknown,
}

impl UpdateType {
    /// Wire name, as used in the `types` polling parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::MessageCreated => "message_created",
            UpdateType::MessageEdited => "message_edited",
            UpdateType::MessageRemoved => "message_removed",
            UpdateType::MessageCallback => "message_callback",
            UpdateType::BotStarted => "bot_started",
            UpdateType::BotStopped => "bot_stopped",
            UpdateType::BotAdded => "bot_added",
            UpdateType::BotRemoved => "bot_removed",
            UpdateType::UserAdded => "user_added",
            UpdateType::UserRemoved => "user_removed",
            UpdateType::ChatTitleChanged => "chat_title_changed",
            UpdateType::MessageChatCreated => "message_chat_created",
            UpdateType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for UpdateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound event. Which optional fields are set depends on `update_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_type: UpdateType,
    /// Unix time in milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    pub message: Option<Message>,
    pub callback: Option<Callback>,
    /// Acting user for lifecycle updates (bot_started, bot_added, user_added, ...).
    pub user: Option<User>,
    pub chat_id: Option<i64>,
    pub payload: Option<String>,
    pub user_locale: Option<String>,
}

impl Update {
    /// Message text, if this update carries a message with text.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text())
    }

    /// The user the update originates from: message sender, callback presser, or `user`.
    pub fn actor(&self) -> Option<&User> {
        if let Some(sender) = self.message.as_ref().and_then(|m| m.sender.as_ref()) {
            return Some(sender);
        }
        if let Some(cb) = &self.callback {
            return Some(&cb.user);
        }
        self.user.as_ref()
    }

    /// Chat the update belongs to, from the message recipient or the top-level `chat_id`.
    pub fn chat_id(&self) -> Option<i64> {
        self.message
            .as_ref()
            .and_then(|m| m.chat_id())
            .or(self.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatType;

    #[test]
    fn test_decode_message_created() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_type": "message_created",
                "timestamp": 1700000000000,
                "message": {
                    "sender": {"user_id": 1, "first_name": "Olga"},
                    "recipient": {"chat_id": 1, "chat_type": "dialog"},
                    "body": {"mid": "m1", "seq": 1, "text": "/start"}
                },
                "user_locale": "ru"
            }"#,
        )
        .unwrap();
        assert_eq!(update.update_type, UpdateType::MessageCreated);
        assert_eq!(update.text(), Some("/start"));
        assert_eq!(update.actor().map(|u| u.user_id), Some(1));
        assert_eq!(update.chat_id(), Some(1));
        assert_eq!(
            update.message.as_ref().and_then(|m| m.chat_type()),
            Some(ChatType::Dialog)
        );
    }

    #[test]
    fn test_unknown_update_type_still_decodes() {
        let update: Update =
            serde_json::from_str(r#"{"update_type": "dialog_muted", "timestamp": 5}"#).unwrap();
        assert_eq!(update.update_type, UpdateType::Unknown);
        assert!(update.text().is_none());
        assert!(update.actor().is_none());
    }

    #[test]
    fn test_lifecycle_update_actor_and_chat() {
        let update: Update = serde_json::from_str(
            r#"{"update_type": "bot_added", "chat_id": 99, "user": {"user_id": 5, "first_name": "Max"}}"#,
        )
        .unwrap();
        assert_eq!(update.update_type, UpdateType::BotAdded);
        assert_eq!(update.chat_id(), Some(99));
        assert_eq!(update.actor().map(|u| u.full_name()), Some("Max".to_string()));
    }

    #[test]
    fn test_wire_names_round_through_display() {
        assert_eq!(UpdateType::MessageCallback.to_string(), "message_callback");
        let parsed: UpdateType = serde_json::from_str("\"chat_title_changed\"").unwrap();
        assert_eq!(parsed, UpdateType::ChatTitleChanged);
    }
}
