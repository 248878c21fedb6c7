use chrono::{TimeDelta, Utc};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

use crate::{data::afk::AfkRepository, error::AppError, model::afk::SetAfkParam};

/// Tests that setting AFK twice keeps a single row with the latest values.
///
/// Expected: Ok with the second reason and no expected return time
#[tokio::test]
async fn upsert_replaces_existing_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let user_id = user.user_id as u64;

    let repo = AfkRepository::new(db);
    let now = Utc::now();
    repo.upsert(SetAfkParam {
        user_id,
        reason: Some("lunch".to_string()),
        expected_back: Some(now + TimeDelta::hours(2)),
        set_at: now,
    })
    .await?;

    let status = repo
        .upsert(SetAfkParam {
            user_id,
            reason: Some("meeting".to_string()),
            expected_back: None,
            set_at: now,
        })
        .await?;

    assert_eq!(status.reason.as_deref(), Some("meeting"));
    assert!(status.expected_back.is_none());
    assert_eq!(entity::prelude::AfkStatus::find().all(db).await?.len(), 1);

    Ok(())
}

/// Tests deleting an AFK status reports whether a row was removed.
///
/// Expected: true for the first delete, false afterwards
#[tokio::test]
async fn delete_reports_removed_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_afk_status(db, user.user_id).await?;

    let repo = AfkRepository::new(db);

    assert!(repo.delete_by_user(user.user_id as u64).await?);
    assert!(!repo.delete_by_user(user.user_id as u64).await?);
    assert!(repo.find_by_user(user.user_id as u64).await?.is_none());

    Ok(())
}
