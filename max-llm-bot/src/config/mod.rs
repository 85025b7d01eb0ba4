//! Bot configuration: BaseConfig (MAX transport + log + polling) + AppSettings (history, rate
//! limit, retries, system prompt) + the GigaChat config from llm-client.

mod app;
mod base;
mod bot_config;


pub use app::{AppSettings, DEFAULT_SYSTEM_PROMPT};
pub use base::BaseConfig;
pub use bot_config::BotConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Reads `name` and parses it; `default` when unset or blank. A set but unparseable value is an error.
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, v)),
        _ => Ok(default),
    }
}

/// Reads `name`; `None` when unset or blank.
pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
