//! AFK status repository.
//!
//! A user has at most one AFK row, enforced by the unique index on `user_id`; setting
//! AFK again overwrites the previous row in place.

use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    error::AppError,
    model::afk::{AfkStatus, SetAfkParam},
    util::id::to_db_id,
};

pub struct AfkRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AfkRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the AFK status of a user.
    ///
    /// The user row must already exist.
    ///
    /// # Returns
    /// - `Ok(AfkStatus)` - The stored status
    /// - `Err(AppError::DbErr)` - Database error, including a missing user row
    pub async fn upsert(&self, param: SetAfkParam) -> Result<AfkStatus, AppError> {
        let entity = entity::prelude::AfkStatus::insert(entity::afk_status::ActiveModel {
            user_id: ActiveValue::Set(to_db_id(param.user_id)?),
            reason: ActiveValue::Set(param.reason),
            expected_back: ActiveValue::Set(param.expected_back),
            set_at: ActiveValue::Set(param.set_at),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::afk_status::Column::UserId)
                .update_columns([
                    entity::afk_status::Column::Reason,
                    entity::afk_status::Column::ExpectedBack,
                    entity::afk_status::Column::SetAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        AfkStatus::from_entity(entity)
    }

    pub async fn find_by_user(&self, user_id: u64) -> Result<Option<AfkStatus>, AppError> {
        let entity = entity::prelude::AfkStatus::find()
            .filter(entity::afk_status::Column::UserId.eq(to_db_id(user_id)?))
            .one(self.db)
            .await?;

        entity.map(AfkStatus::from_entity).transpose()
    }

    /// Deletes the AFK status of a user.
    ///
    /// # Returns
    /// - `Ok(true)` - A status existed and was removed
    /// - `Ok(false)` - The user was not AFK
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn delete_by_user(&self, user_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::AfkStatus::delete_many()
            .filter(entity::afk_status::Column::UserId.eq(to_db_id(user_id)?))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
