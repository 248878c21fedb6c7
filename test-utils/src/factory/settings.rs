//! Settings factories for guild and user configuration rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a guild settings row with every feature set to `enabled`.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
    guild_id: i64,
    enabled: bool,
) -> Result<entity::guild_settings::Model, DbErr> {
    let now = Utc::now();
    entity::guild_settings::ActiveModel {
        guild_id: ActiveValue::Set(guild_id),
        emoji_tracking_enabled: ActiveValue::Set(enabled),
        spam_detection_enabled: ActiveValue::Set(enabled),
        call_tracking_enabled: ActiveValue::Set(enabled),
        settings: ActiveValue::Set(serde_json::json!({})),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Creates a user settings row with the given opt-out flag.
pub async fn create_user_settings(
    db: &DatabaseConnection,
    user_id: i64,
    opt_out: bool,
) -> Result<entity::user_settings::Model, DbErr> {
    let now = Utc::now();
    entity::user_settings::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        opt_out: ActiveValue::Set(opt_out),
        settings: ActiveValue::Set(serde_json::json!({})),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_guild_settings_with_all_features() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let settings = create_guild_settings(db, 42, true).await?;

        assert!(settings.emoji_tracking_enabled);
        assert!(settings.spam_detection_enabled);
        assert!(settings.call_tracking_enabled);

        Ok(())
    }
}
