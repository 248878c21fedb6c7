use super::*;

/// Tests creating a new user.
///
/// Expected: Ok with the user stored under the given id and name
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            user_id: 123456789,
            discord_name: "TestUser".to_string(),
        })
        .await?;

    assert_eq!(user.user_id, 123456789);
    assert_eq!(user.discord_name, "TestUser");

    Ok(())
}

/// Tests that upserting an existing user refreshes the stored name.
///
/// Expected: Ok with the new name and the original creation time
#[tokio::test]
async fn refreshes_name_of_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let original = repo
        .upsert(UpsertUserParam {
            user_id: 123456789,
            discord_name: "OriginalName".to_string(),
        })
        .await?;

    let updated = repo
        .upsert(UpsertUserParam {
            user_id: 123456789,
            discord_name: "UpdatedName".to_string(),
        })
        .await?;

    assert_eq!(updated.discord_name, "UpdatedName");
    assert_eq!(updated.created_at, original.created_at);

    Ok(())
}
