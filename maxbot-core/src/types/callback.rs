//! Inline button callback.

use serde::{Deserialize, Serialize};

use super::user::User;

/// A button press. The message carrying the keyboard arrives on the enclosing update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub user: User,
    pub payload: Option<String>,
}
