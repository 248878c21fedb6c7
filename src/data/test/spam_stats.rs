use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

use crate::{data::spam_stats::SpamStatsRepository, error::AppError};

/// Tests that the first trigger creates the counter at one and later ones increment it.
///
/// Expected: counts 1 then 2 for the same category
#[tokio::test]
async fn increment_creates_then_increments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let user_id = user.user_id as u64;

    let repo = SpamStatsRepository::new(db);

    let first = repo.increment(user_id, "caps_spam", Utc::now()).await?;
    let second = repo.increment(user_id, "caps_spam", Utc::now()).await?;

    assert_eq!(first.count, 1);
    assert_eq!(second.count, 2);

    Ok(())
}

/// Tests that counters are kept per category and listed by name.
///
/// Expected: two counters ordered alphabetically
#[tokio::test]
async fn get_by_user_lists_each_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_spam_stats(db, user.user_id, "repeated_messages", 3).await?;
    factory::create_spam_stats(db, user.user_id, "caps_spam", 1).await?;

    let repo = SpamStatsRepository::new(db);
    let stats = repo.get_by_user(user.user_id as u64).await?;

    let names: Vec<&str> = stats.iter().map(|s| s.spam_type.as_str()).collect();
    assert_eq!(names, vec!["caps_spam", "repeated_messages"]);
    assert_eq!(stats[1].count, 3);

    Ok(())
}
