//! AFK status domain models.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{error::AppError, util::id::from_db_id};

/// A user's active AFK status.
#[derive(Debug, Clone, PartialEq)]
pub struct AfkStatus {
    pub user_id: u64,
    pub reason: Option<String>,
    /// When the user said they would be back, if they did.
    pub expected_back: Option<DateTime<Utc>>,
    pub set_at: DateTime<Utc>,
}

impl AfkStatus {
    pub fn from_entity(entity: entity::afk_status::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: from_db_id(entity.user_id)?,
            reason: entity.reason,
            expected_back: entity.expected_back,
            set_at: entity.set_at,
        })
    }

    /// How long the user has been AFK at `now`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.set_at
    }
}

/// Parameters for setting or refreshing a user's AFK status.
#[derive(Debug, Clone)]
pub struct SetAfkParam {
    pub user_id: u64,
    pub reason: Option<String>,
    pub expected_back: Option<DateTime<Utc>>,
    pub set_at: DateTime<Utc>,
}

/// Raw `/afk` input as typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct AfkRequest {
    pub user_id: u64,
    pub user_name: String,
    pub reason: Option<String>,
    /// Duration such as `2h`, `30m` or `1d`.
    pub expected_back: Option<String>,
    /// Hours from UTC used to display the expected return time.
    pub timezone_offset: Option<String>,
}

/// Outcome of a successful `/afk`.
#[derive(Debug, Clone, PartialEq)]
pub struct AfkConfirmation {
    pub status: AfkStatus,
    /// Validated display offset; `None` when the user gave none.
    pub timezone_offset: Option<i32>,
}

/// Notice about a mentioned user who is currently AFK.
#[derive(Debug, Clone, PartialEq)]
pub struct AfkMention {
    pub user_id: u64,
    pub status: AfkStatus,
}
