//! Voice call session repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{error::AppError, model::call_session::CallSession, util::id::to_db_id};

pub struct CallSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CallSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a session for a user who joined a voice channel.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of an existing user
    /// - `channel_id` - Voice channel joined
    /// - `join_ts` - Time of the join
    ///
    /// # Returns
    /// - `Ok(CallSession)` - The open session
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn open(
        &self,
        user_id: u64,
        channel_id: u64,
        join_ts: DateTime<Utc>,
    ) -> Result<CallSession, AppError> {
        let entity = entity::call_session::ActiveModel {
            user_id: ActiveValue::Set(to_db_id(user_id)?),
            channel_id: ActiveValue::Set(to_db_id(channel_id)?),
            join_ts: ActiveValue::Set(join_ts),
            leave_ts: ActiveValue::Set(None),
            duration: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CallSession::from_entity(entity)
    }

    /// Closes the most recently joined open session of a user.
    ///
    /// Older open sessions, left behind by missed leave events, are not touched.
    ///
    /// # Returns
    /// - `Ok(Some(CallSession))` - The closed session with its duration set
    /// - `Ok(None)` - The user had no open session
    /// - `Err(AppError::DbErr)` - Database error during query or update
    pub async fn close_latest_open(
        &self,
        user_id: u64,
        leave_ts: DateTime<Utc>,
    ) -> Result<Option<CallSession>, AppError> {
        let Some(open) = entity::prelude::CallSession::find()
            .filter(entity::call_session::Column::UserId.eq(to_db_id(user_id)?))
            .filter(entity::call_session::Column::LeaveTs.is_null())
            .order_by_desc(entity::call_session::Column::JoinTs)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let duration = (leave_ts - open.join_ts).num_seconds().max(0);

        let mut active: entity::call_session::ActiveModel = open.into();
        active.leave_ts = ActiveValue::Set(Some(leave_ts));
        active.duration = ActiveValue::Set(Some(duration));

        let updated = active.update(self.db).await?;

        CallSession::from_entity(updated).map(Some)
    }

    /// Returns every session of a user, oldest first.
    pub async fn get_by_user(&self, user_id: u64) -> Result<Vec<CallSession>, AppError> {
        let entities = entity::prelude::CallSession::find()
            .filter(entity::call_session::Column::UserId.eq(to_db_id(user_id)?))
            .order_by_asc(entity::call_session::Column::JoinTs)
            .all(self.db)
            .await?;

        entities.into_iter().map(CallSession::from_entity).collect()
    }
}
