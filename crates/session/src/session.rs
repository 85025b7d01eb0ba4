//! Bounded turn history for one conversation.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use prompt::{ChatMessage, MessageRole};

use crate::key::SessionKey;
use crate::stats::{estimate_tokens, SessionStats};

/// Ordered user/assistant turns, capped at `capacity`; the oldest turn is evicted first.
#[derive(Debug, Clone)]
pub struct Session {
    key: SessionKey,
    turns: VecDeque<ChatMessage>,
    capacity: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session. A `capacity` of 0 is treated as 1.
    pub fn new(key: SessionKey, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let now = Utc::now();
        Self {
            key,
            turns: VecDeque::with_capacity(capacity),
            capacity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a turn, evicting the oldest while over capacity.
    pub fn push(&mut self, turn: ChatMessage) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
        self.updated_at = Utc::now();
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.updated_at = Utc::now();
    }

    pub fn turns(&self) -> impl Iterator<Item = &ChatMessage> {
        self.turns.iter()
    }

    /// Copy of the turns, oldest first.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats::default();
        for turn in &self.turns {
            stats.turns += 1;
            match turn.role {
                MessageRole::User => stats.user_turns += 1,
                MessageRole::Assistant => stats.assistant_turns += 1,
                MessageRole::System => {}
            }
            stats.chars += turn.char_count();
            stats.approx_tokens += estimate_tokens(&turn.content);
        }
        stats
    }
}
