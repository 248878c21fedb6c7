//! Spam categories and per-user counters.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::id::from_db_id};

/// Category assigned by the spam classifier, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpamType {
    CharRepetition,
    CapsSpam,
    RepeatedMessages,
}

impl SpamType {
    /// Name stored in the `spam_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CharRepetition => "char_repetition",
            Self::CapsSpam => "caps_spam",
            Self::RepeatedMessages => "repeated_messages",
        }
    }
}

impl fmt::Display for SpamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter of how often a user triggered one spam category.
#[derive(Debug, Clone, PartialEq)]
pub struct SpamStat {
    pub user_id: u64,
    pub spam_type: String,
    pub count: i32,
    pub last_triggered: DateTime<Utc>,
}

impl SpamStat {
    pub fn from_entity(entity: entity::spam_stats::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: from_db_id(entity.user_id)?,
            spam_type: entity.spam_type,
            count: entity.count,
            last_triggered: entity.last_triggered,
        })
    }

    /// Title-cased category name, e.g. `Caps Spam`.
    pub fn display_name(&self) -> String {
        self.spam_type
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
