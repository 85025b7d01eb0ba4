//! # maxbot-api
//!
//! MAX Bot API transport: [`MaxApiClient`] implements [`maxbot_core::Bot`] (send, edit, delete,
//! chat actions, callback answers) and [`maxbot_core::UpdateSource`] (long polling) over HTTP.
//! [`MaxApiConfig`] loads the token and API base URL from env.

mod client;
mod config;

pub use client::{MaxApiClient, DEFAULT_API_URL};
pub use config::MaxApiConfig;
