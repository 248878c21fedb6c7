//! Slash command and autocomplete interactions.

use std::time::Duration;

use chrono::Utc;
use serenity::all::{
    CommandInteraction, Context, CreateAutocompleteResponse, CreateInteractionResponse,
    Interaction, ResolvedValue,
};

use crate::{
    bot::{
        command::{check_choice, execute, ArgKind, ArgSpec, ArgValue, CommandKind, Invocation},
        handler::command_user,
        reply::Reply,
        start::ShardManagerContainer,
    },
    error::command::CommandError,
    state::BotContext,
};

pub async fn handle_interaction(bot: &BotContext, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => handle_command(bot, &ctx, command).await,
        Interaction::Autocomplete(autocomplete) => {
            handle_autocomplete(bot, &ctx, autocomplete).await
        }
        _ => {}
    }
}

/// Runs a slash command.
///
/// The interaction is deferred first so slow commands (such as a rate refresh) do not
/// run into Discord's three second response limit.
async fn handle_command(bot: &BotContext, ctx: &Context, interaction: CommandInteraction) {
    let name = interaction.data.name.as_str();
    let Some(command) = bot.commands.get(name, CommandKind::Slash) else {
        tracing::warn!("Received unknown slash command {}", name);
        return;
    };

    if let Err(e) = interaction.defer(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", name, e);
        return;
    }

    let reply = match build_invocation(&interaction, &command.spec().args) {
        Ok(mut invocation) => {
            invocation.latency = shard_latency(ctx).await;
            execute(bot, command.as_ref(), &invocation).await
        }
        Err(e) => Reply::error(e.to_string()),
    };

    if let Err(e) = interaction
        .create_followup(&ctx.http, reply.to_followup())
        .await
    {
        tracing::error!("Failed to answer /{}: {}", name, e);
    }
}

/// Latest heartbeat latency of the shard this context belongs to.
async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let manager = ctx.data.read().await.get::<ShardManagerContainer>()?.clone();
    let runners = manager.runners.lock().await;

    runners.get(&ctx.shard_id)?.latency
}

fn build_invocation(
    interaction: &CommandInteraction,
    args: &[ArgSpec],
) -> Result<Invocation, CommandError> {
    let mut invocation = Invocation::new(
        command_user(&interaction.user),
        interaction.guild_id.map(|id| id.get()),
        Utc::now(),
    );
    invocation.is_admin = interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.administrator())
        .unwrap_or(false);

    for option in interaction.data.options() {
        let Some(arg) = args.iter().find(|arg| arg.name == option.name) else {
            continue;
        };

        let value = match (arg.kind, option.value) {
            (ArgKind::Text, ResolvedValue::String(value)) => {
                ArgValue::Text(check_choice(arg, value)?)
            }
            (ArgKind::User, ResolvedValue::User(user, _)) => ArgValue::User(command_user(user)),
            _ => continue,
        };
        invocation.args.insert(arg.name.to_string(), value);
    }

    for arg in args.iter().filter(|arg| arg.required) {
        if !invocation.args.contains_key(arg.name) {
            return Err(CommandError::MissingArgument(arg.name.to_string()));
        }
    }

    Ok(invocation)
}

async fn handle_autocomplete(bot: &BotContext, ctx: &Context, interaction: CommandInteraction) {
    let Some(command) = bot
        .commands
        .get(interaction.data.name.as_str(), CommandKind::Slash)
    else {
        return;
    };
    let Some(focused) = interaction.data.autocomplete() else {
        return;
    };

    let response = command
        .autocomplete(focused.name, focused.value)
        .into_iter()
        .fold(CreateAutocompleteResponse::new(), |response, choice| {
            response.add_string_choice(choice.clone(), choice)
        });

    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(response))
        .await
    {
        tracing::warn!(
            "Failed to answer autocomplete for /{}: {}",
            interaction.data.name,
            e
        );
    }
}
