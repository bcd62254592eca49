//! afk-bot - Telegram AFK assistant
//!
//! Answers people who write to the operator while the operator is away.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - Key-value settings (MongoDB or in-memory)
//! - `cache` - Moka caches in front of the database
//! - `presence` - Away state, counters and notification policy
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Operator command handlers
//! - `events` - Handlers for non-command messages
//! - `i18n` - User-facing texts
//! - `utils` - Utility functions

mod bot;
mod cache;
mod config;
mod database;
mod events;
mod i18n;
mod plugins;
mod presence;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bot::{AppState, Operator};
use config::Config;
use database::{Database, KvRepository, KvStore, MemoryStore};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("afk_bot=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting afk-bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    i18n::init();

    let store: Arc<dyn KvStore> = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let db = Database::connect(uri, &config.mongodb_database).await?;
            info!("Database connected");
            Arc::new(KvRepository::new(&db))
        }
        None => {
            warn!("MONGODB_URI not set, custom AFK message will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    // Throttle respects Telegram's rate limits:
    // - 30 messages per second globally
    // - 1 message per second to the same chat
    // - 20 messages per minute to the same group
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let operator_username = match config.operator_username.clone() {
        Some(username) => Some(username),
        None => resolve_operator_username(&bot, config.operator_id).await,
    };

    match &operator_username {
        Some(username) => info!("Operator: {} (@{})", config.operator_id, username),
        None => warn!(
            "Operator {} has no known username, group @mentions will not be detected",
            config.operator_id
        ),
    }

    let state = AppState::new(store, Operator::new(config.operator_id, operator_username));
    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    bot::run(&config, bot, dispatcher).await
}

/// Look the operator's username up. Works once the operator has started the bot.
async fn resolve_operator_username(bot: &bot::ThrottledBot, operator_id: u64) -> Option<String> {
    let chat_id = ChatId::from(UserId(operator_id));
    match bot.get_chat(chat_id).await {
        Ok(chat) => chat.username().map(str::to_string),
        Err(e) => {
            warn!("Could not resolve operator username: {}", e);
            None
        }
    }
}
