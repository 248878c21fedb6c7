//! Guild and user configuration models.

use std::{fmt, str::FromStr};

use serde_json::{Map, Value};

use crate::{error::AppError, util::id::from_db_id};

/// A guild-level tracking feature that can be toggled by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    EmojiTracking,
    SpamDetection,
    CallTracking,
}

impl Feature {
    /// Short names accepted by `!config enable|disable`.
    pub const SHORT_NAMES: [&'static str; 3] = ["emoji", "spam", "call"];

    /// Settings key (and column name) backing this feature.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EmojiTracking => "emoji_tracking_enabled",
            Self::SpamDetection => "spam_detection_enabled",
            Self::CallTracking => "call_tracking_enabled",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::EmojiTracking => "emoji",
            Self::SpamDetection => "spam",
            Self::CallTracking => "call",
        }
    }

    /// Resolves a settings key to the feature column it addresses.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "emoji_tracking_enabled" => Some(Self::EmojiTracking),
            "spam_detection_enabled" => Some(Self::SpamDetection),
            "call_tracking_enabled" => Some(Self::CallTracking),
            _ => None,
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emoji" => Ok(Self::EmojiTracking),
            "spam" => Ok(Self::SpamDetection),
            "call" => Ok(Self::CallTracking),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Per-guild tracking switches plus free-form settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfig {
    pub guild_id: u64,
    pub emoji_tracking_enabled: bool,
    pub spam_detection_enabled: bool,
    pub call_tracking_enabled: bool,
    pub settings: Map<String, Value>,
}

impl GuildConfig {
    /// Configuration used when the stored settings cannot be read: every feature off.
    pub fn disabled(guild_id: u64) -> Self {
        Self {
            guild_id,
            emoji_tracking_enabled: false,
            spam_detection_enabled: false,
            call_tracking_enabled: false,
            settings: Map::new(),
        }
    }

    pub fn from_entity(entity: entity::guild_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: from_db_id(entity.guild_id)?,
            emoji_tracking_enabled: entity.emoji_tracking_enabled,
            spam_detection_enabled: entity.spam_detection_enabled,
            call_tracking_enabled: entity.call_tracking_enabled,
            settings: settings_map(entity.settings),
        })
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::EmojiTracking => self.emoji_tracking_enabled,
            Feature::SpamDetection => self.spam_detection_enabled,
            Feature::CallTracking => self.call_tracking_enabled,
        }
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConfig {
    pub user_id: u64,
    /// Whether the user asked not to be tracked.
    pub opt_out: bool,
    pub settings: Map<String, Value>,
}

impl UserConfig {
    /// Configuration used when the stored settings cannot be read.
    pub fn default_for(user_id: u64) -> Self {
        Self {
            user_id,
            opt_out: false,
            settings: Map::new(),
        }
    }

    pub fn from_entity(entity: entity::user_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: from_db_id(entity.user_id)?,
            opt_out: entity.opt_out,
            settings: settings_map(entity.settings),
        })
    }
}

/// Non-object JSON in the settings column is treated as empty.
fn settings_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
