//! Two-tier (guild and user) configuration cache.
//!
//! Reads are served from memory once a guild or user has been loaded. Writes go straight
//! to the database and then evict the cached entry, so the next read observes the new
//! value. There is no expiry; the process is assumed to be the only writer.
//!
//! Storage failures never reach the caller: reads fall back to safe defaults that are not
//! cached, and writes report `false`.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    data::settings::{GuildSettingsRepository, UserSettingsRepository},
    error::AppError,
    model::settings::{Feature, GuildConfig, UserConfig},
};

pub struct ConfigCache {
    db: DatabaseConnection,
    guilds: RwLock<HashMap<u64, GuildConfig>>,
    users: RwLock<HashMap<u64, UserConfig>>,
}

impl ConfigCache {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            guilds: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configuration of a guild.
    ///
    /// Loads (creating if needed) and caches the stored settings on a miss. When storage
    /// fails, every feature is reported disabled and nothing is cached.
    pub async fn get_guild_config(&self, guild_id: u64) -> GuildConfig {
        if let Some(config) = self.guilds.read().await.get(&guild_id) {
            return config.clone();
        }

        match GuildSettingsRepository::new(&self.db)
            .find_or_create(guild_id)
            .await
        {
            Ok(config) => {
                self.guilds.write().await.insert(guild_id, config.clone());
                config
            }
            Err(e) => {
                tracing::error!("Failed to load settings for guild {}: {}", guild_id, e);
                GuildConfig::disabled(guild_id)
            }
        }
    }

    /// Updates one setting of a guild and evicts its cached entry.
    ///
    /// Feature keys (`emoji_tracking_enabled`, `spam_detection_enabled`,
    /// `call_tracking_enabled`) require a boolean value and update their column. Any other
    /// key is stored in the guild's JSON settings.
    ///
    /// # Returns
    /// - `true` - The value was persisted
    /// - `false` - Storage failed or a feature key was given a non-boolean value
    pub async fn update_guild_config(&self, guild_id: u64, key: &str, value: Value) -> bool {
        let repo = GuildSettingsRepository::new(&self.db);

        let result: Result<GuildConfig, AppError> = match Feature::from_key(key) {
            Some(feature) => match value.as_bool() {
                Some(enabled) => repo.set_feature(guild_id, feature, enabled).await,
                None => {
                    tracing::warn!(
                        "Rejected non-boolean value {} for guild setting {}",
                        value,
                        key
                    );
                    return false;
                }
            },
            None => repo.set_setting(guild_id, key, value).await,
        };

        match result {
            Ok(_) => {
                self.guilds.write().await.remove(&guild_id);
                tracing::info!("Updated setting {} for guild {}", key, guild_id);
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to update setting {} for guild {}: {}",
                    key,
                    guild_id,
                    e
                );
                false
            }
        }
    }

    /// Whether a tracking feature is enabled for a guild.
    pub async fn is_feature_enabled(&self, guild_id: u64, feature: Feature) -> bool {
        self.get_guild_config(guild_id).await.is_enabled(feature)
    }

    /// Returns the configuration of a user.
    ///
    /// When storage fails the user is treated as opted in and nothing is cached.
    pub async fn get_user_config(&self, user_id: u64) -> UserConfig {
        if let Some(config) = self.users.read().await.get(&user_id) {
            return config.clone();
        }

        match UserSettingsRepository::new(&self.db)
            .find_or_create(user_id)
            .await
        {
            Ok(config) => {
                self.users.write().await.insert(user_id, config.clone());
                config
            }
            Err(e) => {
                tracing::error!("Failed to load settings for user {}: {}", user_id, e);
                UserConfig::default_for(user_id)
            }
        }
    }

    /// Sets a user's opt-out flag and evicts their cached entry.
    ///
    /// # Returns
    /// - `true` - The flag was persisted
    /// - `false` - Storage failed
    pub async fn set_user_opt_out(&self, user_id: u64, opt_out: bool) -> bool {
        match UserSettingsRepository::new(&self.db)
            .set_opt_out(user_id, opt_out)
            .await
        {
            Ok(_) => {
                self.users.write().await.remove(&user_id);
                tracing::info!("Set opt-out to {} for user {}", opt_out, user_id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to set opt-out for user {}: {}", user_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_utils::{builder::TestBuilder, context::TestContext};

    use super::*;
    use crate::data::settings::GuildSettingsRepository;

    #[tokio::test]
    async fn update_evicts_stale_entry() {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let cache = ConfigCache::new(db.clone());

        assert!(cache.get_guild_config(1).await.spam_detection_enabled);

        // Changed behind the cache's back: the cached value is now stale
        GuildSettingsRepository::new(db)
            .set_feature(1, Feature::EmojiTracking, false)
            .await
            .unwrap();
        assert!(cache.get_guild_config(1).await.emoji_tracking_enabled);

        assert!(
            cache
                .update_guild_config(1, "spam_detection_enabled", json!(false))
                .await
        );

        let config = cache.get_guild_config(1).await;
        assert!(!config.spam_detection_enabled);
        assert!(!config.emoji_tracking_enabled);
    }

    #[tokio::test]
    async fn unknown_keys_go_to_json_settings() {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let cache = ConfigCache::new(db.clone());

        assert!(cache.update_guild_config(1, "greeting", json!("hi")).await);

        let config = cache.get_guild_config(1).await;
        assert_eq!(config.settings.get("greeting"), Some(&json!("hi")));
    }

    #[tokio::test]
    async fn feature_keys_require_booleans() {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let cache = ConfigCache::new(db.clone());

        assert!(
            !cache
                .update_guild_config(1, "call_tracking_enabled", json!("yes"))
                .await
        );
        assert!(cache.is_feature_enabled(1, Feature::CallTracking).await);
    }

    #[tokio::test]
    async fn storage_failure_returns_uncached_defaults() {
        // No tables: every query fails
        let mut test = TestContext::new();
        let db = test.database().await.unwrap();
        let cache = ConfigCache::new(db.clone());

        assert_eq!(cache.get_guild_config(5).await, GuildConfig::disabled(5));
        assert!(!cache.get_user_config(5).await.opt_out);
        assert!(!cache.set_user_opt_out(5, true).await);
        assert!(cache.guilds.read().await.is_empty());
        assert!(cache.users.read().await.is_empty());
    }

    #[tokio::test]
    async fn opt_out_is_visible_after_update() {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let cache = ConfigCache::new(db.clone());

        assert!(!cache.get_user_config(3).await.opt_out);
        assert!(cache.set_user_opt_out(3, true).await);

        assert!(cache.get_user_config(3).await.opt_out);
    }
}
