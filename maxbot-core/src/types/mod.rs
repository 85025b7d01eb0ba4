//! Core types: updates, messages, users, chats, callbacks, outgoing requests.
//!
//! One file per main type. Field names follow the MAX Bot API JSON so values decode with serde directly.

mod callback;
mod chat;
mod message;
mod outgoing;
mod polling;
mod update;
mod user;

pub use callback::Callback;
pub use chat::ChatType;
pub use message::{Attachment, Message, MessageBody, Recipient};
pub use outgoing::{CallbackAnswer, ChatAction, NewMessage, SendTarget};
pub use polling::{PollRequest, UpdateBatch};
pub use update::{Update, UpdateType};
pub use user::{BotInfo, User};
