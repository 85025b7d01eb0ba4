//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub const DEFAULT_BASE_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
pub const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";
pub const DEFAULT_MODEL: &str = "GigaChat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// GigaChat configuration interface.
pub trait LlmConfig: Send + Sync {
    /// Base64 authorization key sent as `Authorization: Basic <credentials>` to OAuth.
    fn credentials(&self) -> &str;
    fn scope(&self) -> &str;
    fn model(&self) -> &str;
    fn auth_url(&self) -> &str;
    fn base_url(&self) -> &str;
    fn verify_ssl(&self) -> bool;
    fn timeout_secs(&self) -> u64;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub gigachat_credentials: String,
    pub gigachat_scope: String,
    pub gigachat_model: String,
    pub gigachat_auth_url: String,
    pub gigachat_base_url: String,
    pub gigachat_verify_ssl: bool,
    pub llm_timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn credentials(&self) -> &str {
        &self.gigachat_credentials
    }
    fn scope(&self) -> &str {
        &self.gigachat_scope
    }
    fn model(&self) -> &str {
        &self.gigachat_model
    }
    fn auth_url(&self) -> &str {
        &self.gigachat_auth_url
    }
    fn base_url(&self) -> &str {
        &self.gigachat_base_url
    }
    fn verify_ssl(&self) -> bool {
        self.gigachat_verify_ssl
    }
    fn timeout_secs(&self) -> u64 {
        self.llm_timeout_secs
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. Only GIGACHAT_CREDENTIALS is required.
    pub fn from_env() -> Result<Self> {
        let gigachat_credentials =
            env::var("GIGACHAT_CREDENTIALS").context("GIGACHAT_CREDENTIALS not set")?;
        let gigachat_scope = env::var("GIGACHAT_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string());
        let gigachat_model = env::var("GIGACHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let gigachat_auth_url =
            env::var("GIGACHAT_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string());
        let gigachat_base_url =
            env::var("GIGACHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let gigachat_verify_ssl = match env::var("GIGACHAT_VERIFY_SSL") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("GIGACHAT_VERIFY_SSL must be true or false, got {:?}", v))?,
            Err(_) => true,
        };
        let llm_timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("LLM_TIMEOUT_SECS must be a number of seconds, got {:?}", v))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            gigachat_credentials,
            gigachat_scope,
            gigachat_model,
            gigachat_auth_url,
            gigachat_base_url,
            gigachat_verify_ssl,
            llm_timeout_secs,
        })
    }

    /// Credentials non-empty, URLs parseable, timeout non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.gigachat_credentials.trim().is_empty() {
            anyhow::bail!("GIGACHAT_CREDENTIALS is empty");
        }
        for (name, url) in [
            ("GIGACHAT_AUTH_URL", &self.gigachat_auth_url),
            ("GIGACHAT_BASE_URL", &self.gigachat_base_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.llm_timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
