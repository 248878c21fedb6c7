use super::*;

/// Tests that a missing user is created with the default name.
///
/// Expected: Ok with the user named "Unknown"
#[tokio::test]
async fn creates_missing_user_with_default_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.get_or_create(7, "Unknown").await?;

    assert_eq!(user.user_id, 7);
    assert_eq!(user.discord_name, "Unknown");

    Ok(())
}

/// Tests that an existing user keeps their stored name.
///
/// Expected: Ok with the original name rather than the default
#[tokio::test]
async fn keeps_name_of_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .user_id(7)
        .discord_name("Bob")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo.get_or_create(7, "Unknown").await?;

    assert_eq!(user.discord_name, "Bob");

    Ok(())
}
