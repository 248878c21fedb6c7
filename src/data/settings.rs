//! Guild and user settings repositories.
//!
//! Settings rows are created on first read with every guild feature enabled and the
//! user opted in. Known feature keys map onto dedicated columns; anything else is kept
//! in the free-form JSON `settings` column.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    model::settings::{Feature, GuildConfig, UserConfig},
    util::id::to_db_id,
};

pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the settings of a guild, creating the default row when absent.
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Stored or newly created settings
    /// - `Err(AppError::DbErr)` - Database error during query or insert
    pub async fn find_or_create(&self, guild_id: u64) -> Result<GuildConfig, AppError> {
        let entity = self.find_or_create_entity(guild_id).await?;

        GuildConfig::from_entity(entity)
    }

    /// Turns one tracking feature of a guild on or off.
    pub async fn set_feature(
        &self,
        guild_id: u64,
        feature: Feature,
        enabled: bool,
    ) -> Result<GuildConfig, AppError> {
        let existing = self.find_or_create_entity(guild_id).await?;

        let mut active: entity::guild_settings::ActiveModel = existing.into();
        match feature {
            Feature::EmojiTracking => active.emoji_tracking_enabled = ActiveValue::Set(enabled),
            Feature::SpamDetection => active.spam_detection_enabled = ActiveValue::Set(enabled),
            Feature::CallTracking => active.call_tracking_enabled = ActiveValue::Set(enabled),
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        GuildConfig::from_entity(active.update(self.db).await?)
    }

    /// Stores an arbitrary key in the guild's JSON settings, replacing any previous value.
    pub async fn set_setting(
        &self,
        guild_id: u64,
        key: &str,
        value: Value,
    ) -> Result<GuildConfig, AppError> {
        let existing = self.find_or_create_entity(guild_id).await?;

        let mut settings = match existing.settings.clone() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        settings.insert(key.to_string(), value);

        let mut active: entity::guild_settings::ActiveModel = existing.into();
        active.settings = ActiveValue::Set(Value::Object(settings));
        active.updated_at = ActiveValue::Set(Utc::now());

        GuildConfig::from_entity(active.update(self.db).await?)
    }

    async fn find_or_create_entity(
        &self,
        guild_id: u64,
    ) -> Result<entity::guild_settings::Model, AppError> {
        let db_guild_id = to_db_id(guild_id)?;

        if let Some(entity) = entity::prelude::GuildSettings::find_by_id(db_guild_id)
            .one(self.db)
            .await?
        {
            return Ok(entity);
        }

        let now = Utc::now();
        let entity = entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(db_guild_id),
            emoji_tracking_enabled: ActiveValue::Set(true),
            spam_detection_enabled: ActiveValue::Set(true),
            call_tracking_enabled: ActiveValue::Set(true),
            settings: ActiveValue::Set(Value::Object(Map::new())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(entity)
    }
}

pub struct UserSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the settings of a user, creating an opted-in row when absent.
    pub async fn find_or_create(&self, user_id: u64) -> Result<UserConfig, AppError> {
        let entity = self.find_or_create_entity(user_id).await?;

        UserConfig::from_entity(entity)
    }

    /// Sets whether a user is excluded from statistics tracking.
    pub async fn set_opt_out(&self, user_id: u64, opt_out: bool) -> Result<UserConfig, AppError> {
        let existing = self.find_or_create_entity(user_id).await?;

        let mut active: entity::user_settings::ActiveModel = existing.into();
        active.opt_out = ActiveValue::Set(opt_out);
        active.updated_at = ActiveValue::Set(Utc::now());

        UserConfig::from_entity(active.update(self.db).await?)
    }

    async fn find_or_create_entity(
        &self,
        user_id: u64,
    ) -> Result<entity::user_settings::Model, AppError> {
        let db_user_id = to_db_id(user_id)?;

        if let Some(entity) = entity::prelude::UserSettings::find_by_id(db_user_id)
            .one(self.db)
            .await?
        {
            return Ok(entity);
        }

        let now = Utc::now();
        let entity = entity::user_settings::ActiveModel {
            user_id: ActiveValue::Set(db_user_id),
            opt_out: ActiveValue::Set(false),
            settings: ActiveValue::Set(Value::Object(Map::new())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(entity)
    }
}
