//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::id::from_db_id};

/// Name stored for users first seen through an event that carries no name.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// A Discord user the bot has interacted with.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub user_id: u64,
    /// Last known Discord name of the user.
    pub discord_name: String,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(NegativeStoredId))` - Stored id is not a snowflake
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: from_db_id(entity.user_id)?,
            discord_name: entity.discord_name,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating a user or refreshing their stored name.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Discord ID of the user
    pub user_id: u64,
    /// Current Discord name of the user.
    pub discord_name: String,
}
