//! Configuration module.
//!
//! Loads configuration from environment variables.

use std::env;

use serde::Deserialize;
use thiserror::Error;

/// Port the webhook server listens on when `WEBHOOK_PORT` is unset.
pub const DEFAULT_WEBHOOK_PORT: u16 = 8443;

/// Bot running mode
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Configuration problems found at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("WEBHOOK_URL must be set when BOT_MODE is webhook")]
    WebhookUrlMissing,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Telegram user the bot answers for.
    pub operator_id: u64,

    /// Operator username (without @), used to spot mentions in groups.
    /// Optional - resolved via getChat if not set.
    pub operator_username: Option<String>,

    // MongoDB
    /// Without a URI the bot keeps its settings in memory.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_mode = match var("BOT_MODE").map(|m| m.to_lowercase()).as_deref() {
            Some("webhook") => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = var("WEBHOOK_URL");

        // Validate webhook URL is set if mode is webhook
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::WebhookUrlMissing);
        }

        let webhook_port = match var("WEBHOOK_PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                name: "WEBHOOK_PORT",
                value: p,
            })?,
            None => DEFAULT_WEBHOOK_PORT,
        };

        let operator_id = var("OPERATOR_ID").ok_or(ConfigError::Missing("OPERATOR_ID"))?;
        let operator_id = operator_id.parse().map_err(|_| ConfigError::Invalid {
            name: "OPERATOR_ID",
            value: operator_id,
        })?;

        // Parse operator username (strip @ if present)
        let operator_username = var("OPERATOR_USERNAME")
            .map(|s| s.trim_start_matches('@').to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            bot_token: var("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: var("WEBHOOK_SECRET"),
            operator_id,
            operator_username,
            mongodb_uri: var("MONGODB_URI"),
            mongodb_database: var("MONGODB_DATABASE").unwrap_or_else(|| "afk_bot".to_string()),
        })
    }
}
