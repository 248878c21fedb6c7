use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Message, Ready, User, VoiceState};
use serenity::async_trait;

use crate::{bot::command::CommandUser, state::BotContext};

pub mod interaction;
pub mod message;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub ctx: Arc<BotContext>,
}

impl Handler {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.ctx, ctx, ready).await;
    }

    /// Called when a message is sent in a channel the bot can see
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.ctx, ctx, message).await;
    }

    /// Called when a member joins, leaves or switches a voice channel
    async fn voice_state_update(&self, _ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.ctx, old, new).await;
    }

    /// Called for slash commands and autocomplete requests
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.ctx, ctx, interaction).await;
    }
}

/// Converts a Discord user into the user type commands work with.
pub fn command_user(user: &User) -> CommandUser {
    CommandUser {
        id: user.id.get(),
        name: user.name.clone(),
        display_name: user.display_name().to_string(),
        avatar_url: Some(user.face()),
    }
}
