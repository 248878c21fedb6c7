//! Spam counter repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{error::AppError, model::spam::SpamStat, util::id::to_db_id};

pub struct SpamStatsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SpamStatsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Increments the counter of one spam category for a user.
    ///
    /// Creates the counter at 1 when the user has never triggered the category. The
    /// user row must already exist.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user
    /// - `spam_type` - Stored category name
    /// - `now` - Written to `last_triggered`
    ///
    /// # Returns
    /// - `Ok(SpamStat)` - The counter after incrementing
    /// - `Err(AppError::DbErr)` - Database error during query, insert or update
    pub async fn increment(
        &self,
        user_id: u64,
        spam_type: &str,
        now: DateTime<Utc>,
    ) -> Result<SpamStat, AppError> {
        let db_user_id = to_db_id(user_id)?;

        let existing = entity::prelude::SpamStats::find()
            .filter(entity::spam_stats::Column::UserId.eq(db_user_id))
            .filter(entity::spam_stats::Column::SpamType.eq(spam_type))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(stat) => {
                let count = stat.count + 1;
                let mut active: entity::spam_stats::ActiveModel = stat.into();
                active.count = ActiveValue::Set(count);
                active.last_triggered = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::spam_stats::ActiveModel {
                    user_id: ActiveValue::Set(db_user_id),
                    spam_type: ActiveValue::Set(spam_type.to_string()),
                    count: ActiveValue::Set(1),
                    last_triggered: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        SpamStat::from_entity(entity)
    }

    /// Returns every counter of a user ordered by category name.
    pub async fn get_by_user(&self, user_id: u64) -> Result<Vec<SpamStat>, AppError> {
        let entities = entity::prelude::SpamStats::find()
            .filter(entity::spam_stats::Column::UserId.eq(to_db_id(user_id)?))
            .order_by_asc(entity::spam_stats::Column::SpamType)
            .all(self.db)
            .await?;

        entities.into_iter().map(SpamStat::from_entity).collect()
    }
}
