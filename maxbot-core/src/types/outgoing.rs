//! Outgoing request types: message target, new message body, chat actions, callback answers.

use serde::Serialize;

use super::message::Attachment;

/// Destination of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendTarget {
    Chat(i64),
    User(i64),
}

/// Body of a message to send or an edit to apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewMessage {
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub notify: bool,
    /// Sent as a query parameter, not in the body.
    #[serde(skip)]
    pub disable_link_preview: bool,
}

impl NewMessage {
    /// Plain text message with notification on and link previews enabled.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
            notify: true,
            disable_link_preview: false,
        }
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

/// Chat activity indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    TypingOn,
    SendingPhoto,
    SendingVideo,
    SendingAudio,
    SendingFile,
    MarkSeen,
}

/// Reply to a button press: a one-time notification and/or a replacement message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallbackAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<NewMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

impl CallbackAnswer {
    pub fn notification(text: impl Into<String>) -> Self {
        Self {
            message: None,
            notification: Some(text.into()),
        }
    }
}
