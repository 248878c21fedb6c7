use chrono::Utc;
use serenity::all::VoiceState;

use crate::{
    service::statistics::{StatisticsService, VoiceUpdate},
    state::BotContext,
};

/// Handle a voice state change by turning it into call session updates.
///
/// Only guild members that are not bots are tracked. The member's display name is
/// stored with the session's user.
pub async fn handle_voice_state_update(bot: &BotContext, old: Option<VoiceState>, new: VoiceState) {
    let (Some(guild_id), Some(member)) = (new.guild_id, new.member.as_ref()) else {
        return;
    };

    if member.user.bot {
        return;
    }

    let update = VoiceUpdate {
        guild_id: guild_id.get(),
        user_id: new.user_id.get(),
        user_name: member.display_name().to_string(),
        before_channel: old.and_then(|state| state.channel_id).map(|id| id.get()),
        after_channel: new.channel_id.map(|id| id.get()),
    };
    let user_id = update.user_id;

    if let Err(e) = StatisticsService::new(bot)
        .handle_voice_update(update, Utc::now())
        .await
    {
        tracing::error!("Failed to update call session for user {}: {}", user_id, e);
    }
}
