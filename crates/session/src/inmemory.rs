//! # In-memory session store
//!
//! Sessions live in a `HashMap` behind `Arc<RwLock<>>`. Data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::key::SessionKey;
use crate::session::Session;
use crate::stats::SessionStats;
use crate::store::SessionStore;

/// Default number of turns kept per session.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// In-memory [`SessionStore`].
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Session>>>,
    max_history: usize,
}

impl InMemorySessionStore {
    /// Creates an empty store keeping at most `max_history` turns per session (at least 1).
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_history: max_history.max(1),
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, key: &SessionKey) -> Result<Vec<ChatMessage>> {
        if let Some(session) = self.sessions.read().await.get(key) {
            return Ok(session.history());
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(key.clone()).or_insert_with(|| {
            info!(session_key = %key, "step: session created");
            Session::new(key.clone(), self.max_history)
        });
        Ok(session.history())
    }

    async fn append_turn(&self, key: &SessionKey, role: MessageRole, text: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key.clone(), self.max_history));
        session.push(ChatMessage::new(role, text));
        debug!(
            session_key = %key,
            role = %role,
            turns = session.len(),
            "Turn appended"
        );
        Ok(())
    }

    async fn clear(&self, key: &SessionKey) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(key) {
            let removed = session.len();
            session.clear();
            info!(session_key = %key, removed = removed, "step: session cleared");
        }
        Ok(())
    }

    async fn stats(&self, key: &SessionKey) -> Result<SessionStats> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(key).map(Session::stats).unwrap_or_default())
    }

    async fn history(&self, key: &SessionKey) -> Result<Vec<ChatMessage>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(key).map(Session::history).unwrap_or_default())
    }

    async fn session_count(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }

    async fn session_keys(&self) -> Result<Vec<SessionKey>> {
        let mut keys: Vec<SessionKey> = self.sessions.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(chat: i64) -> SessionKey {
        SessionKey::derive(Some(chat), None, None).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_is_lazy() {
        let store = InMemorySessionStore::new(4);
        assert_eq!(store.session_count().await.unwrap(), 0);
        assert!(store.history(&key(1)).await.unwrap().is_empty());
        assert_eq!(store.session_count().await.unwrap(), 0);

        assert!(store.get_or_create(&key(1)).await.unwrap().is_empty());
        assert_eq!(store.session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_then_clear() {
        let store = InMemorySessionStore::default();
        store.append_turn(&key(1), MessageRole::User, "hi").await.unwrap();
        store.append_turn(&key(1), MessageRole::Assistant, "hello").await.unwrap();
        assert_eq!(store.stats(&key(1)).await.unwrap().turns, 2);

        store.clear(&key(1)).await.unwrap();
        assert_eq!(store.stats(&key(1)).await.unwrap(), SessionStats::default());
        assert!(store.history(&key(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cap_keeps_most_recent_in_order() {
        let store = InMemorySessionStore::new(3);
        for i in 0..7 {
            store
                .append_turn(&key(1), MessageRole::User, &format!("t{}", i))
                .await
                .unwrap();
        }
        let history = store.history(&key(1)).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["t4", "t5", "t6"]);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemorySessionStore::new(10);
        store.append_turn(&key(1), MessageRole::User, "a").await.unwrap();
        store.append_turn(&key(2), MessageRole::User, "b").await.unwrap();
        store.clear(&key(1)).await.unwrap();

        assert_eq!(store.stats(&key(1)).await.unwrap().turns, 0);
        assert_eq!(store.stats(&key(2)).await.unwrap().turns, 1);
        assert_eq!(store.session_keys().await.unwrap(), vec![key(1), key(2)]);
    }

    #[tokio::test]
    async fn test_clear_missing_session_is_noop() {
        let store = InMemorySessionStore::new(10);
        store.clear(&key(9)).await.unwrap();
        assert_eq!(store.session_count().await.unwrap(), 0);
    }
}
