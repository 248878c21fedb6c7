//! Error types for the bot.
//!
//! `AppError` is the top-level error returned by repositories, services and command
//! handlers. User-facing validation failures live in `CommandError` and are rendered back
//! to the invoking user as an error embed; every other variant is logged and replaced by
//! a generic failure message.

pub mod command;
pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{command::CommandError, config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates the domain error enums and the errors of every library the bot talks to.
/// Most variants use `#[from]` so `?` can be used throughout the service and data layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during start-up or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Invalid user input to a command.
    ///
    /// The message is shown to the user verbatim; no state has been changed.
    #[error(transparent)]
    CommandErr(#[from] CommandError),

    /// Unexpected state indicating a bug or corrupt data.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Filesystem error while reading or writing local state.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// JSON (de)serialization error for the emoji statistics file.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Invalid regular expression while building a matcher.
    #[error(transparent)]
    RegexErr(#[from] regex::Error),

    /// Logging could not be initialised.
    #[error("Failed to initialise logging: {0}")]
    LoggingErr(String),
}

/// Boxes the error to keep `AppError` small, as `serenity::Error` is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to the user when this error escapes a command.
    ///
    /// Command errors carry their own wording; everything else is hidden behind a
    /// generic message so internal details never reach the channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::CommandErr(err) => err.to_string(),
            _ => "An error occurred while executing the command.".to_string(),
        }
    }
}
