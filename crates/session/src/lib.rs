//! # Session
//!
//! Per-conversation chat history for the bot.
//!
//! - [`SessionKey`]: which conversation a message belongs to (per chat, or per participant in groups)
//! - [`Session`]: bounded FIFO of user/assistant turns
//! - [`SessionStore`]: keyed storage; [`InMemorySessionStore`] is the default implementation
//! - [`SessionStats`] / [`estimate_tokens`]: counters shown to users
//!
//! ## Example
//!
//! ```rust
//! use session::{InMemorySessionStore, SessionKey, SessionStore};
//! use prompt::MessageRole;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = InMemorySessionStore::new(10);
//!     let key = SessionKey::derive(Some(42), Some(7), None).unwrap();
//!
//!     store.append_turn(&key, MessageRole::User, "Hello").await?;
//!     assert_eq!(store.stats(&key).await?.user_turns, 1);
//!     Ok(())
//! }
//! ```

mod inmemory;
mod key;
mod session;
mod stats;
mod store;

pub use inmemory::{InMemorySessionStore, DEFAULT_MAX_HISTORY};
pub use key::SessionKey;
pub use session::Session;
pub use stats::{estimate_tokens, SessionStats};
pub use store::SessionStore;
