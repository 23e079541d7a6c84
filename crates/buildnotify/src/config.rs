use std::env;

use thiserror::Error;
use tracing::debug;

/// Environment variable holding the chat webhook endpoint.
pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Discord webhook URL is not set (DISCORD_WEBHOOK_URL). Please check your .env file.")]
    MissingWebhook,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
}

impl Config {
    /// Load `.env` (searched upward from the current dir) into the process
    /// environment, then read the webhook endpoint from it.
    ///
    /// Variables already present in the environment win over the file.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded env file"),
            Err(err) => debug!(%err, "no env file loaded"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup(WEBHOOK_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingWebhook)?;
        Ok(Self { webhook_url })
    }
}
