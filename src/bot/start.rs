use std::sync::Arc;

use serenity::{
    all::{Client, GatewayIntents, ShardManager},
    prelude::TypeMapKey,
};

use crate::{bot::handler::Handler, config::Config, error::AppError, state::BotContext};

/// Shard manager stored in the client data so handlers can read shard latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Builds the Discord client without connecting it.
///
/// The returned client's shard manager can be used to shut the bot down from another
/// task.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `ctx` - Shared bot context handed to the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client could not be built
pub async fn init_bot(config: &Config, ctx: Arc<BotContext>) -> Result<Client, AppError> {
    // MESSAGE_CONTENT and GUILD_MEMBERS are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES;

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(ctx))
        .await?;

    client
        .data
        .write()
        .await
        .insert::<ShardManagerContainer>(client.shard_manager.clone());

    Ok(client)
}

/// Connects the bot and processes events until the shard manager shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
