//! Ready event handler.
//!
//! Fired once the bot has connected to the gateway. Slash commands are registered
//! globally here so the registration always matches the running build.

use serenity::all::{Command as DiscordCommand, Context, Ready};

use crate::state::BotContext;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `bot` - Shared bot context holding the command registry
/// - `ctx` - Discord context used for the registration request
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(bot: &BotContext, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let commands = bot.commands.slash_commands();
    match DiscordCommand::set_global_commands(&ctx.http, commands).await {
        Ok(registered) => tracing::info!("Registered {} slash commands", registered.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
