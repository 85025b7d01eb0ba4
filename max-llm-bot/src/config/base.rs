//! Base config: MAX Bot API connection, logging, polling. Loaded from env.

use anyhow::{Context, Result};
use maxbot_api::MaxApiConfig;
use maxbot_core::PollRequest;
use std::env;

use super::{optional_var, parse_var};

/// Base config: transport, logging and polling only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// MAX_API_URL; default API host when unset
    pub max_api_url: Option<String>,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// POLL_LIMIT: max updates per poll (1..=1000)
    pub poll_limit: u32,
    /// POLL_TIMEOUT: long-poll timeout in seconds (0..=90)
    pub poll_timeout_secs: u32,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let max_api_url = optional_var("MAX_API_URL");
        let log_file = optional_var("LOG_FILE");
        let poll_limit = parse_var("POLL_LIMIT", PollRequest::DEFAULT_LIMIT)?;
        let poll_timeout_secs = parse_var("POLL_TIMEOUT", PollRequest::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            bot_token,
            max_api_url,
            log_file,
            poll_limit,
            poll_timeout_secs,
        })
    }

    /// Transport config for [`maxbot_api::MaxApiClient`].
    pub fn api_config(&self) -> MaxApiConfig {
        MaxApiConfig {
            bot_token: self.bot_token.clone(),
            api_url: self.max_api_url.clone(),
        }
    }

    /// Validate config: token present, API URL parseable, polling bounds respected.
    pub fn validate(&self) -> Result<()> {
        self.api_config().validate()?;
        if !(1..=PollRequest::MAX_LIMIT).contains(&self.poll_limit) {
            anyhow::bail!(
                "POLL_LIMIT must be between 1 and {}, got {}",
                PollRequest::MAX_LIMIT,
                self.poll_limit
            );
        }
        if self.poll_timeout_secs > PollRequest::MAX_TIMEOUT_SECS {
            anyhow::bail!(
                "POLL_TIMEOUT must be at most {} seconds, got {}",
                PollRequest::MAX_TIMEOUT_SECS,
                self.poll_timeout_secs
            );
        }
        Ok(())
    }
}
