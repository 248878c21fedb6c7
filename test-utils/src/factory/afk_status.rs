//! AFK status factory for creating test AFK entities.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating AFK status rows for an existing user.
pub struct AfkStatusFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i64,
    reason: Option<String>,
    expected_back: Option<DateTime<Utc>>,
    set_at: DateTime<Utc>,
}

impl<'a> AfkStatusFactory<'a> {
    /// Creates a new factory with no reason, no expected return, and `set_at` of now.
    pub fn new(db: &'a DatabaseConnection, user_id: i64) -> Self {
        Self {
            db,
            user_id,
            reason: None,
            expected_back: None,
            set_at: Utc::now(),
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn expected_back(mut self, expected_back: DateTime<Utc>) -> Self {
        self.expected_back = Some(expected_back);
        self
    }

    pub fn set_at(mut self, set_at: DateTime<Utc>) -> Self {
        self.set_at = set_at;
        self
    }

    /// Builds and inserts the AFK status entity into the database.
    pub async fn build(self) -> Result<entity::afk_status::Model, DbErr> {
        entity::afk_status::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            reason: ActiveValue::Set(self.reason),
            expected_back: ActiveValue::Set(self.expected_back),
            set_at: ActiveValue::Set(self.set_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an AFK status with default values for the given user.
pub async fn create_afk_status(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<entity::afk_status::Model, DbErr> {
    AfkStatusFactory::new(db, user_id).build().await
}
