//! Storage abstraction for session history.
//!
//! Implementations must keep operations on one key independent of every other key.

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};

use crate::key::SessionKey;
use crate::stats::SessionStats;

/// Keyed store of bounded conversation histories.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the turns of `key`, creating an empty session when absent.
    async fn get_or_create(&self, key: &SessionKey) -> Result<Vec<ChatMessage>>;

    /// Appends one turn, trimming the oldest turns beyond the capacity.
    async fn append_turn(&self, key: &SessionKey, role: MessageRole, text: &str) -> Result<()>;

    /// Removes all turns of `key`. A missing session is not an error.
    async fn clear(&self, key: &SessionKey) -> Result<()>;

    /// Counters for `key`; all zero for a missing session.
    async fn stats(&self, key: &SessionKey) -> Result<SessionStats>;

    /// Snapshot of the turns of `key` without creating it.
    async fn history(&self, key: &SessionKey) -> Result<Vec<ChatMessage>>;

    async fn session_count(&self) -> Result<usize>;

    async fn session_keys(&self) -> Result<Vec<SessionKey>>;
}
