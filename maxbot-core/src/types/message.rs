//! Message, recipient, body and attachment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::ChatType, outgoing::SendTarget, user::User};

/// Where a message was delivered: a chat (with its type) and/or a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub chat_id: Option<i64>,
    pub chat_type: Option<ChatType>,
    pub user_id: Option<i64>,
}

/// Message attachment; the payload shape depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub seq: i64,
    pub text: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
}

/// An inbound message. Immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Option<User>,
    #[serde(default)]
    pub recipient: Recipient,
    #[serde(default)]
    pub body: MessageBody,
    /// Unix time in milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    pub url: Option<String>,
    pub link: Option<serde_json::Value>,
    pub stat: Option<serde_json::Value>,
}

impl Message {
    pub fn text(&self) -> Option<&str> {
        self.body.text.as_deref()
    }

    pub fn message_id(&self) -> &str {
        &self.body.mid
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.recipient.chat_id
    }

    pub fn chat_type(&self) -> Option<ChatType> {
        self.recipient.chat_type
    }

    /// Sender's user id, if the message has a sender.
    pub fn user_id(&self) -> Option<i64> {
        self.sender.as_ref().map(|u| u.user_id)
    }

    pub fn from_user(&self) -> Option<&User> {
        self.sender.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Leading `/command` of the text, with any `@botname` suffix stripped.
    pub fn command(&self) -> Option<&str> {
        let text = self.text()?.trim();
        if !text.starts_with('/') {
            return None;
        }
        let first = text.split_whitespace().next()?;
        first.split('@').next()
    }

    /// Text after the command token, trimmed. Empty when there is none.
    pub fn command_args(&self) -> &str {
        let text = self.text().unwrap_or("").trim();
        match text.split_once(char::is_whitespace) {
            Some((_, rest)) => rest.trim(),
            None => "",
        }
    }

    /// Where replies go: the chat when known, otherwise the sender directly.
    pub fn reply_target(&self) -> Option<SendTarget> {
        self.chat_id()
            .map(SendTarget::Chat)
            .or_else(|| self.user_id().map(SendTarget::User))
    }
}
