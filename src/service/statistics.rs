//! Guild activity statistics.
//!
//! Feeds guild messages into emoji tracking and the spam classifier, turns voice state
//! changes into call sessions, and reads the collected statistics back for the stats
//! commands. Every feature is gated per guild and skipped for users who opted out.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{
    data::{
        call_session::CallSessionRepository, spam_stats::SpamStatsRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        call_session::CallSession,
        emoji::EmojiStats,
        settings::Feature,
        spam::{SpamStat, SpamType},
        user::{UpsertUserParam, UNKNOWN_USER_NAME},
    },
    state::BotContext,
};

/// What the statistics listener did with one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOutcome {
    /// At least one emoji was counted and the statistics file rewritten.
    pub emoji_recorded: bool,
    /// Spam category the message was classified under, if any.
    pub spam: Option<SpamType>,
}

/// How a user's voice channel changed between two voice state events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    Join { channel_id: u64 },
    Leave,
    Switch { to_channel_id: u64 },
}

impl VoiceTransition {
    /// Derives the transition from the channel before and after the event.
    ///
    /// Returns `None` when the channel did not change, e.g. on mute or deafen.
    pub fn between(before: Option<u64>, after: Option<u64>) -> Option<Self> {
        match (before, after) {
            (None, Some(channel_id)) => Some(Self::Join { channel_id }),
            (Some(_), None) => Some(Self::Leave),
            (Some(from), Some(to)) if from != to => Some(Self::Switch { to_channel_id: to }),
            _ => None,
        }
    }
}

/// A voice state change of a non-bot guild member.
#[derive(Debug, Clone)]
pub struct VoiceUpdate {
    pub guild_id: u64,
    pub user_id: u64,
    pub user_name: String,
    pub before_channel: Option<u64>,
    pub after_channel: Option<u64>,
}

pub struct StatisticsService<'a> {
    ctx: &'a BotContext,
}

impl<'a> StatisticsService<'a> {
    pub fn new(ctx: &'a BotContext) -> Self {
        Self { ctx }
    }

    /// Runs emoji tracking and spam detection over a guild message.
    ///
    /// Failures of either feature are logged and do not stop the other.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the message was sent in
    /// - `author_id` - Non-bot author of the message
    /// - `content` - Raw message content
    /// - `now` - Time the message was received
    pub async fn process_message(
        &self,
        guild_id: u64,
        author_id: u64,
        content: &str,
        now: DateTime<Utc>,
    ) -> MessageOutcome {
        let mut outcome = MessageOutcome::default();

        if self.ctx.config_cache.get_user_config(author_id).await.opt_out {
            return outcome;
        }

        if self
            .ctx
            .config_cache
            .is_feature_enabled(guild_id, Feature::EmojiTracking)
            .await
        {
            let usage = self.ctx.emoji_extractor.extract(content);
            match self.ctx.emoji_store.record(author_id, &usage, now).await {
                Ok(recorded) => outcome.emoji_recorded = recorded,
                Err(e) => tracing::error!("Failed to save emoji stats for {}: {}", author_id, e),
            }
        }

        if self
            .ctx
            .config_cache
            .is_feature_enabled(guild_id, Feature::SpamDetection)
            .await
        {
            outcome.spam = self
                .ctx
                .spam_detector
                .classify(author_id, content, Instant::now())
                .await;

            if let Some(spam_type) = outcome.spam {
                tracing::debug!("Message from {} classified as {}", author_id, spam_type);
                if let Err(e) = self.record_spam(author_id, spam_type, now).await {
                    tracing::error!("Failed to record {} for {}: {}", spam_type, author_id, e);
                }
            }
        }

        outcome
    }

    /// Increments a user's counter for one spam category.
    ///
    /// Users never seen before are created under a placeholder name.
    pub async fn record_spam(
        &self,
        user_id: u64,
        spam_type: SpamType,
        now: DateTime<Utc>,
    ) -> Result<SpamStat, AppError> {
        UserRepository::new(&self.ctx.db)
            .get_or_create(user_id, UNKNOWN_USER_NAME)
            .await?;

        SpamStatsRepository::new(&self.ctx.db)
            .increment(user_id, spam_type.as_str(), now)
            .await
    }

    /// Opens and closes call sessions for a voice state change.
    ///
    /// # Returns
    /// - `Ok(Some(transition))` - Sessions were updated for `transition`
    /// - `Ok(None)` - Call tracking is disabled, the user opted out, or the channel did
    ///   not change
    /// - `Err(AppError::DbErr)` - Database error while storing the user or sessions
    pub async fn handle_voice_update(
        &self,
        update: VoiceUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<VoiceTransition>, AppError> {
        let Some(transition) = VoiceTransition::between(update.before_channel, update.after_channel)
        else {
            return Ok(None);
        };

        if !self
            .ctx
            .config_cache
            .is_feature_enabled(update.guild_id, Feature::CallTracking)
            .await
        {
            return Ok(None);
        }

        if self.ctx.config_cache.get_user_config(update.user_id).await.opt_out {
            return Ok(None);
        }

        UserRepository::new(&self.ctx.db)
            .upsert(UpsertUserParam {
                user_id: update.user_id,
                discord_name: update.user_name,
            })
            .await?;

        let sessions = CallSessionRepository::new(&self.ctx.db);

        match transition {
            VoiceTransition::Join { channel_id } => {
                sessions.open(update.user_id, channel_id, now).await?;
                tracing::debug!("User {} joined voice channel {}", update.user_id, channel_id);
            }
            VoiceTransition::Leave => {
                self.close_session(&sessions, update.user_id, now).await?;
            }
            VoiceTransition::Switch { to_channel_id } => {
                self.close_session(&sessions, update.user_id, now).await?;
                sessions.open(update.user_id, to_channel_id, now).await?;
                tracing::debug!(
                    "User {} switched to voice channel {}",
                    update.user_id,
                    to_channel_id
                );
            }
        }

        Ok(Some(transition))
    }

    async fn close_session(
        &self,
        sessions: &CallSessionRepository<'_>,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        match sessions.close_latest_open(user_id, now).await? {
            Some(session) => tracing::debug!(
                "Closed call session {} for user {} after {:?}s",
                session.session_id,
                user_id,
                session.duration
            ),
            // Joined before the bot started or while tracking was disabled
            None => tracing::debug!("No open call session to close for user {}", user_id),
        }

        Ok(())
    }

    pub async fn emoji_stats(&self, user_id: u64) -> Option<EmojiStats> {
        self.ctx.emoji_store.get(user_id).await
    }

    pub async fn spam_stats(&self, user_id: u64) -> Result<Vec<SpamStat>, AppError> {
        SpamStatsRepository::new(&self.ctx.db)
            .get_by_user(user_id)
            .await
    }

    pub async fn call_sessions(&self, user_id: u64) -> Result<Vec<CallSession>, AppError> {
        CallSessionRepository::new(&self.ctx.db)
            .get_by_user(user_id)
            .await
    }
}
