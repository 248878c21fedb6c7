//! Call session factory for creating voice session entities.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating call sessions for an existing user.
///
/// Sessions are open (no leave timestamp) unless `leave_ts` is set, in which case
/// the duration is derived from the two timestamps.
pub struct CallSessionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i64,
    channel_id: i64,
    join_ts: DateTime<Utc>,
    leave_ts: Option<DateTime<Utc>>,
}

impl<'a> CallSessionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i64) -> Self {
        Self {
            db,
            user_id,
            channel_id: next_id(),
            join_ts: Utc::now(),
            leave_ts: None,
        }
    }

    pub fn channel_id(mut self, channel_id: i64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn join_ts(mut self, join_ts: DateTime<Utc>) -> Self {
        self.join_ts = join_ts;
        self
    }

    pub fn leave_ts(mut self, leave_ts: DateTime<Utc>) -> Self {
        self.leave_ts = Some(leave_ts);
        self
    }

    /// Builds and inserts the call session entity into the database.
    pub async fn build(self) -> Result<entity::call_session::Model, DbErr> {
        let duration = self
            .leave_ts
            .map(|leave| (leave - self.join_ts).num_seconds());

        entity::call_session::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            channel_id: ActiveValue::Set(self.channel_id),
            join_ts: ActiveValue::Set(self.join_ts),
            leave_ts: ActiveValue::Set(self.leave_ts),
            duration: ActiveValue::Set(duration),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open call session joined now for the given user.
pub async fn create_call_session(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<entity::call_session::Model, DbErr> {
    CallSessionFactory::new(db, user_id).build().await
}
