//! Shared state handed to every event handler and command.
//!
//! `BotContext` is built once in `main` and shared behind an `Arc`. It replaces any
//! process-wide globals: the database pool, the in-process caches and the command
//! registry all live here and are dropped at shutdown.

use std::{path::PathBuf, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::{
    bot::command::CommandRegistry,
    config::SpamConfig,
    data::emoji_stats::EmojiStatsStore,
    error::AppError,
    service::{
        config_cache::ConfigCache,
        currency::{RateCache, RateSource},
        emoji::EmojiExtractor,
        spam::SpamDetector,
    },
};

pub struct BotContext {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,
    pub config_cache: ConfigCache,
    pub spam_detector: SpamDetector,
    pub rate_cache: RateCache,
    pub emoji_store: EmojiStatsStore,
    pub emoji_extractor: EmojiExtractor,
    pub commands: CommandRegistry,
}

impl BotContext {
    /// Builds the context and registers every bot command.
    ///
    /// # Arguments
    /// - `db` - Database connection with migrations applied
    /// - `spam` - Spam classifier thresholds
    /// - `emoji_stats_file` - Location of the emoji statistics JSON file
    /// - `rate_source` - Where exchange rates are fetched from
    ///
    /// # Returns
    /// - `Ok(BotContext)` - Ready to be shared with the event handler
    /// - `Err(AppError::RegexErr)` - The emoji matchers failed to compile
    pub async fn new(
        db: DatabaseConnection,
        spam: SpamConfig,
        emoji_stats_file: impl Into<PathBuf>,
        rate_source: Arc<dyn RateSource>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            config_cache: ConfigCache::new(db.clone()),
            db,
            spam_detector: SpamDetector::new(spam),
            rate_cache: RateCache::new(rate_source),
            emoji_store: EmojiStatsStore::load(emoji_stats_file).await,
            emoji_extractor: EmojiExtractor::new()?,
            commands: CommandRegistry::with_default_commands(),
        })
    }
}
