//! User data repository for database operations.
//!
//! Users are created lazily the first time the bot needs to reference them, either
//! with their real name (commands, voice events) or as `Unknown` when the triggering
//! event does not carry one.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
};

use crate::{
    error::AppError,
    model::user::{UpsertUserParam, User},
    util::id::to_db_id,
};

/// Repository providing database operations for users.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user or refreshes the stored name of an existing one.
    ///
    /// # Arguments
    /// - `param` - Discord id and current name of the user
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError::DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            user_id: ActiveValue::Set(to_db_id(param.user_id)?),
            discord_name: ActiveValue::Set(param.discord_name),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::UserId)
                .update_column(entity::user::Column::DiscordName)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by Discord id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - The bot has never stored this user
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(to_db_id(user_id)?)
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Returns the stored user, creating it with `default_name` when absent.
    ///
    /// Unlike `upsert`, an existing user's name is left untouched.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user
    /// - `default_name` - Name stored only if the user is created
    ///
    /// # Returns
    /// - `Ok(User)` - Existing or newly created user
    /// - `Err(AppError::DbErr)` - Database error during query or insert
    pub async fn get_or_create(&self, user_id: u64, default_name: &str) -> Result<User, AppError> {
        if let Some(user) = self.find_by_id(user_id).await? {
            return Ok(user);
        }

        let entity = entity::user::ActiveModel {
            user_id: ActiveValue::Set(to_db_id(user_id)?),
            discord_name: ActiveValue::Set(default_name.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }
}
