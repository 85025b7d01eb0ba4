//! App settings: conversation history, rate limit, LLM retries and the system prompt.

use anyhow::Result;

pub use prompt::DEFAULT_SYSTEM_PROMPT;

use super::{optional_var, parse_var};

pub const DEFAULT_MAX_HISTORY: usize = 10;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 20;
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 2;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// MAX_HISTORY: turns kept per session
    pub max_history: usize,
    /// RATE_LIMIT_PER_MINUTE: LLM requests allowed per minute, bot-wide
    pub rate_limit_per_minute: u32,
    /// LLM_MAX_RETRIES: extra attempts after a transient LLM failure
    pub llm_max_retries: u32,
    /// SYSTEM_PROMPT
    pub system_prompt: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            llm_max_retries: DEFAULT_LLM_MAX_RETRIES,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            max_history: parse_var("MAX_HISTORY", DEFAULT_MAX_HISTORY)?,
            rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", DEFAULT_RATE_LIMIT_PER_MINUTE)?,
            llm_max_retries: parse_var("LLM_MAX_RETRIES", DEFAULT_LLM_MAX_RETRIES)?,
            system_prompt: optional_var("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            anyhow::bail!("MAX_HISTORY must be at least 1");
        }
        if self.rate_limit_per_minute == 0 {
            anyhow::bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }
        Ok(())
    }
}
