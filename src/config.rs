//! Environment-based bot configuration.
//!
//! Values are read once at start-up after `.env` has been loaded. Only the bot token is
//! required; everything else falls back to a default suited to a single-host SQLite
//! deployment.

use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/bot.db?mode=rwc";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "logs/bot.log";
const DEFAULT_EMOJI_STATS_FILE: &str = "data/emoji_stats.json";
const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Thresholds used by the spam classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SpamConfig {
    /// Length of a run of one character that counts as repetition spam.
    pub char_repetition_threshold: usize,
    /// Ratio of uppercase to alphabetic characters that counts as caps spam.
    pub caps_ratio_threshold: f64,
    /// How long sent messages are remembered for the repeated-message rule.
    pub repeated_msg_window: Duration,
    /// Number of earlier identical messages inside the window that triggers the rule.
    pub repeated_msg_count: usize,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            char_repetition_threshold: 5,
            caps_ratio_threshold: 0.7,
            repeated_msg_window: Duration::from_secs(60),
            repeated_msg_count: 4,
        }
    }
}

pub struct Config {
    pub discord_token: String,
    pub database_url: String,

    pub log_level: String,
    /// File the log output is mirrored to; `None` logs to stdout only.
    pub log_file: Option<PathBuf>,

    pub emoji_stats_file: PathBuf,
    pub exchange_rate_url: String,

    pub spam: SpamConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and well-formed
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - `DISCORD_TOKEN` is unset or empty
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - A numeric variable failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let defaults = SpamConfig::default();
        let char_repetition_threshold: usize = parse_var(
            &lookup,
            "SPAM_CHAR_REPETITION_THRESHOLD",
            defaults.char_repetition_threshold,
        )?;
        if char_repetition_threshold == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "SPAM_CHAR_REPETITION_THRESHOLD".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        let spam = SpamConfig {
            char_repetition_threshold,
            caps_ratio_threshold: parse_var(
                &lookup,
                "SPAM_CAPS_RATIO_THRESHOLD",
                defaults.caps_ratio_threshold,
            )?,
            repeated_msg_window: Duration::from_secs(parse_var(
                &lookup,
                "SPAM_REPEATED_MSG_WINDOW",
                defaults.repeated_msg_window.as_secs(),
            )?),
            repeated_msg_count: parse_var(
                &lookup,
                "SPAM_REPEATED_MSG_COUNT",
                defaults.repeated_msg_count,
            )?,
        };

        let log_file = match lookup("LOG_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        Ok(Self {
            discord_token,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_file,
            emoji_stats_file: lookup("EMOJI_STATS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EMOJI_STATS_FILE)),
            exchange_rate_url: lookup("EXCHANGE_RATE_URL")
                .unwrap_or_else(|| DEFAULT_EXCHANGE_RATE_URL.to_string()),
            spam,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
        }),
    }
}
