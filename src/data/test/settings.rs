use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::{
    data::settings::{GuildSettingsRepository, UserSettingsRepository},
    error::AppError,
    model::settings::Feature,
};

/// Tests that a guild seen for the first time gets every feature enabled.
///
/// Expected: Ok with all three switches on and empty settings
#[tokio::test]
async fn new_guild_has_features_enabled() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let config = repo.find_or_create(10).await?;

    assert!(config.emoji_tracking_enabled);
    assert!(config.spam_detection_enabled);
    assert!(config.call_tracking_enabled);
    assert!(config.settings.is_empty());

    Ok(())
}

/// Tests toggling a single feature column.
///
/// Expected: only spam detection is disabled
#[tokio::test]
async fn set_feature_updates_only_that_column() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_guild_settings(db, 10, true).await?;

    let repo = GuildSettingsRepository::new(db);
    let config = repo.set_feature(10, Feature::SpamDetection, false).await?;

    assert!(!config.spam_detection_enabled);
    assert!(config.emoji_tracking_enabled);
    assert!(config.call_tracking_enabled);

    Ok(())
}

/// Tests that unknown keys are merged into the JSON settings.
///
/// Expected: both keys present after two writes
#[tokio::test]
async fn set_setting_merges_json_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.set_setting(10, "prefix", json!("?")).await?;
    let config = repo.set_setting(10, "max_warnings", json!(3)).await?;

    assert_eq!(config.settings.get("prefix"), Some(&json!("?")));
    assert_eq!(config.settings.get("max_warnings"), Some(&json!(3)));

    Ok(())
}

/// Tests the user opt-out flag.
///
/// Expected: new users are opted in, and the flag persists once set
#[tokio::test]
async fn user_opt_out_persists() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserSettingsRepository::new(db);
    assert!(!repo.find_or_create(99).await?.opt_out);

    repo.set_opt_out(99, true).await?;

    assert!(repo.find_or_create(99).await?.opt_out);

    Ok(())
}
