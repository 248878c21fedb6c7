use super::*;

/// Tests finding an existing user.
///
/// Expected: Ok(Some) with the stored name
#[tokio::test]
async fn finds_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .user_id(42)
        .discord_name("Alice")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_id(42).await?;

    assert_eq!(found.map(|u| u.discord_name), Some(created.discord_name));

    Ok(())
}

/// Tests looking up a user that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user_with_id(db, 43).await?;

    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(42).await?.is_none());

    Ok(())
}
