//! Spam stats factory for creating spam counter entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a spam counter row for the given user and category.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Id of an existing user row
/// - `spam_type` - Category name such as `"caps_spam"`
/// - `count` - Initial counter value
pub async fn create_spam_stats(
    db: &DatabaseConnection,
    user_id: i64,
    spam_type: &str,
    count: i32,
) -> Result<entity::spam_stats::Model, DbErr> {
    entity::spam_stats::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        spam_type: ActiveValue::Set(spam_type.to_string()),
        count: ActiveValue::Set(count),
        last_triggered: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
