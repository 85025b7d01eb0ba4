//! User identity and bot info.

use serde::{Deserialize, Serialize};

/// User identity as delivered by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    pub last_activity_time: Option<i64>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub full_avatar_url: Option<String>,
}

impl User {
    /// "First Last", or just the first name.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }

    /// "@username" when set, else the first name.
    pub fn mention(&self) -> String {
        match self.username.as_deref() {
            Some(u) if !u.is_empty() => format!("@{}", u),
            _ => self.first_name.clone(),
        }
    }
}

/// Identity of the bot itself (`GET /me`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotInfo {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    #[serde(default = "default_true")]
    pub is_bot: bool,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
}

fn default_true() -> bool {
    true
}
