//! Guild configuration and personal opt-out commands.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    bot::{
        command::{ArgSpec, Command, CommandKind, CommandSpec, Invocation},
        reply::Reply,
    },
    error::{command::CommandError, AppError},
    model::settings::Feature,
    state::BotContext,
};

const ACTIONS: &[&str] = &["enable", "disable"];

/// `!config enable|disable <emoji|spam|call>`, administrators only.
pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "config",
            "Enable or disable a tracking feature for this server",
            CommandKind::Prefix,
        )
        .admin_only()
        .arg(
            ArgSpec::text("action", "enable or disable")
                .required()
                .choices(ACTIONS),
        )
        .arg(
            ArgSpec::text("feature", "emoji, spam or call")
                .required()
                .choices(&Feature::SHORT_NAMES),
        )
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let guild_id = invocation.guild_id.ok_or(CommandError::GuildOnly)?;
        let enable = invocation.text("action") == Some("enable");
        let raw_feature = invocation
            .text("feature")
            .ok_or_else(|| CommandError::MissingArgument("feature".to_string()))?;
        let feature = Feature::from_str(raw_feature).map_err(|value| CommandError::InvalidChoice {
            name: "feature".to_string(),
            value,
            options: Feature::SHORT_NAMES.iter().map(|s| s.to_string()).collect(),
        })?;

        let updated = ctx
            .config_cache
            .update_guild_config(guild_id, feature.key(), Value::Bool(enable))
            .await;

        if !updated {
            return Ok(Reply::text("❌ Failed to update configuration."));
        }

        tracing::info!(
            "User {} set {} to {} in guild {}",
            invocation.user.id,
            feature.key(),
            enable,
            guild_id
        );

        let verb = if enable { "Enabled" } else { "Disabled" };
        Ok(Reply::text(format!("✅ {} {} tracking.", verb, feature)))
    }
}

async fn set_opt_out(ctx: &BotContext, invocation: &Invocation, opt_out: bool) -> Reply {
    if !ctx
        .config_cache
        .set_user_opt_out(invocation.user.id, opt_out)
        .await
    {
        return Reply::text("❌ Failed to update preferences.");
    }

    if opt_out {
        Reply::text("✅ You have opted out of statistics tracking.")
    } else {
        Reply::text("✅ You have opted in to statistics tracking.")
    }
}

/// `!optout`
pub struct OptOutCommand;

#[async_trait]
impl Command for OptOutCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "optout",
            "Opt out of all statistics tracking",
            CommandKind::Prefix,
        )
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        Ok(set_opt_out(ctx, invocation, true).await)
    }
}

/// `!optin`
pub struct OptInCommand;

#[async_trait]
impl Command for OptInCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new("optin", "Opt in to statistics tracking", CommandKind::Prefix)
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        Ok(set_opt_out(ctx, invocation, false).await)
    }
}
