//! Transport config: token and optional API URL. The app fills it from BOT_TOKEN and MAX_API_URL.

use anyhow::Result;

use crate::client::DEFAULT_API_URL;

/// MAX Bot API connectivity config.
#[derive(Debug, Clone)]
pub struct MaxApiConfig {
    pub bot_token: String,
    pub api_url: Option<String>,
}

impl MaxApiConfig {
    /// Builds config with the given token and the default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            api_url: None,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Token must be non-empty; API URL must parse when set.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url) = self.api_url {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("MAX_API_URL is set but not a valid URL: {}", url);
            }
        }
        Ok(())
    }
}
