//! Full bot config: base + app settings + LLM.

use anyhow::Result;
use dispatcher::PollingConfig;
use llm_client::EnvLlmConfig;
use maxbot_api::MaxApiConfig;

use super::app::AppSettings;
use super::base::BaseConfig;

/// Bot configuration: [`BaseConfig`] (transport, log, polling), [`AppSettings`] and the GigaChat
/// config. Built by [`BotConfig::load`] or assembled directly in tests.
#[derive(Debug, Clone)]
pub struct BotConfig {
    base: BaseConfig,
    app: AppSettings,
    llm: EnvLlmConfig,
}

impl BotConfig {
    pub fn new(base: BaseConfig, app: AppSettings, llm: EnvLlmConfig) -> Self {
        Self { base, app, llm }
    }

    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let app = AppSettings::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self::new(base, app, llm))
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.app.validate()?;
        self.llm.validate()?;
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn app(&self) -> &AppSettings {
        &self.app
    }

    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }

    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }

    pub fn api_config(&self) -> MaxApiConfig {
        self.base.api_config()
    }

    /// Polling parameters; backoff stays at the loop defaults.
    pub fn polling_config(&self) -> PollingConfig {
        PollingConfig {
            limit: self.base.poll_limit,
            timeout_secs: self.base.poll_timeout_secs,
            ..PollingConfig::default()
        }
    }

    pub fn max_history(&self) -> usize {
        self.app.max_history
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.app.rate_limit_per_minute
    }

    pub fn llm_max_retries(&self) -> u32 {
        self.app.llm_max_retries
    }

    pub fn system_prompt(&self) -> &str {
        &self.app.system_prompt
    }
}
