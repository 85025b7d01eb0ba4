//! Session-aware LLM adapter.
//!
//! Builds the prompt from the session history, calls the [`LlmClient`] and records the exchange.
//! Calls for the same session key are serialized so turns stay in order; different keys run
//! concurrently. A failed call leaves the session untouched. No retries here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use prompt::{build_chat_messages, MessageRole};
use session::{SessionKey, SessionStore};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, instrument};

use crate::error::LlmError;
use crate::LlmClient;

pub struct LlmGateway {
    client: Arc<dyn LlmClient>,
    store: Arc<dyn SessionStore>,
    system_prompt: Option<String>,
    key_locks: StdMutex<HashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl LlmGateway {
    pub fn new(client: Arc<dyn LlmClient>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            system_prompt: None,
            key_locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Waits for exclusive use of `key`. The lock entry is dropped from the map once no call
    /// holds or waits on it.
    async fn lock_key(&self, key: &SessionKey) -> KeyLease<'_> {
        let lock = {
            let mut locks = self
                .key_locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(key.clone()).or_default().clone()
        };
        KeyLease {
            locks: &self.key_locks,
            key: key.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of session keys with a call in flight or queued.
    pub fn locked_key_count(&self) -> usize {
        self.key_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Sends `user_text` in the context of session `key` and returns the reply.
    /// On success the user turn and then the assistant turn are appended to the session.
    #[instrument(skip(self, user_text), fields(session_key = %key, text_len = user_text.len()))]
    pub async fn ask(&self, key: &SessionKey, user_text: &str) -> Result<String, LlmError> {
        let _lease = self.lock_key(key).await;

        let history = self
            .store
            .get_or_create(key)
            .await
            .map_err(|e| LlmError::Session(e.to_string()))?;
        let messages = build_chat_messages(self.system_prompt.as_deref(), &history, user_text);
        info!(
            history_turns = history.len(),
            message_count = messages.len(),
            model = %self.client.model(),
            "step: gateway calling LLM"
        );

        let reply = match self.client.chat(messages).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, transient = e.is_transient(), "LLM call failed");
                return Err(e);
            }
        };

        self.store
            .append_turn(key, MessageRole::User, user_text)
            .await
            .map_err(|e| LlmError::Session(e.to_string()))?;
        self.store
            .append_turn(key, MessageRole::Assistant, &reply)
            .await
            .map_err(|e| LlmError::Session(e.to_string()))?;

        info!(reply_len = reply.len(), "step: gateway reply recorded");
        Ok(reply)
    }
}

/// Holds a per-key lock; on drop releases it and removes the map entry if nobody else uses it.
struct KeyLease<'a> {
    locks: &'a StdMutex<HashMap<SessionKey, Arc<Mutex<()>>>>,
    key: SessionKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyLease<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}
