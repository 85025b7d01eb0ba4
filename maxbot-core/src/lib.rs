//! # maxbot-core
//!
//! Core types and traits for the MAX bot: the update/message data model, the [`Bot`] and
//! [`UpdateSource`] transport traits, error types and tracing initialization.
//! Transport-agnostic; implemented by maxbot-api and consumed by dispatcher and the bot app.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, UpdateSource};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Attachment, BotInfo, Callback, CallbackAnswer, ChatAction, ChatType, Message, MessageBody,
    NewMessage, PollRequest, Recipient, SendTarget, Update, UpdateBatch, UpdateType, User,
};
