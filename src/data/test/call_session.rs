use chrono::{TimeDelta, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::{data::call_session::CallSessionRepository, error::AppError};

/// Tests that closing sets the leave time and duration of the open session.
///
/// Expected: Ok(Some) with a 90 second duration
#[tokio::test]
async fn close_sets_duration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let user_id = user.user_id as u64;

    let repo = CallSessionRepository::new(db);
    let join = Utc::now();
    repo.open(user_id, 555, join).await?;

    let closed = repo
        .close_latest_open(user_id, join + TimeDelta::seconds(90))
        .await?
        .expect("open session should be closed");

    assert_eq!(closed.channel_id, 555);
    assert_eq!(closed.duration, Some(90));
    assert!(closed.leave_ts.is_some());

    Ok(())
}

/// Tests that only the newest of several open sessions is closed.
///
/// Expected: the older open session stays open
#[tokio::test]
async fn close_targets_newest_open_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();

    factory::call_session::CallSessionFactory::new(db, user.user_id)
        .channel_id(1)
        .join_ts(now - TimeDelta::hours(2))
        .build()
        .await?;
    factory::call_session::CallSessionFactory::new(db, user.user_id)
        .channel_id(2)
        .join_ts(now - TimeDelta::minutes(5))
        .build()
        .await?;

    let repo = CallSessionRepository::new(db);
    let closed = repo
        .close_latest_open(user.user_id as u64, now)
        .await?
        .expect("newest session should be closed");

    assert_eq!(closed.channel_id, 2);

    let sessions = repo.get_by_user(user.user_id as u64).await?;
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].leave_ts.is_none());
    assert!(sessions[1].leave_ts.is_some());

    Ok(())
}

/// Tests closing when the user has no open session.
///
/// Expected: Ok(None)
#[tokio::test]
async fn close_without_open_session_returns_none() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = CallSessionRepository::new(db);

    assert!(repo
        .close_latest_open(user.user_id as u64, Utc::now())
        .await?
        .is_none());

    Ok(())
}
