use async_trait::async_trait;
use crate::{
    bot::{
        command::{ArgSpec, Command, CommandKind, CommandSpec, Invocation},
        reply::{self, EmbedReply, Reply},
    },
    error::AppError,
    model::afk::AfkRequest,
    service::afk::{format_expected_back, AfkService},
    state::BotContext,
};

/// `/afk [reason] [expected_back] [timezone_offset]`
pub struct AfkCommand;

#[async_trait]
impl Command for AfkCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new("afk", "Set your AFK status", CommandKind::Slash)
            .arg(ArgSpec::text("reason", "Why you are going AFK"))
            .arg(ArgSpec::text(
                "expected_back",
                "When you expect to be back, e.g. 2h, 30m or 1d",
            ))
            .arg(ArgSpec::text(
                "timezone_offset",
                "Your UTC offset in hours for display, e.g. +8 or -5",
            ))
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let request = AfkRequest {
            user_id: invocation.user.id,
            user_name: invocation.user.name.clone(),
            reason: invocation.text("reason").map(str::to_string),
            expected_back: invocation.text("expected_back").map(str::to_string),
            timezone_offset: invocation.text("timezone_offset").map(str::to_string),
        };

        let confirmation = AfkService::new(&ctx.db)
            .set_afk(request, invocation.now)
            .await?;

        let reason = confirmation
            .status
            .reason
            .clone()
            .unwrap_or_else(|| "*No reason provided*".to_string());
        let expected_back = confirmation
            .status
            .expected_back
            .map(|at| format_expected_back(at, confirmation.timezone_offset))
            .unwrap_or_else(|| "*Not specified*".to_string());

        Ok(EmbedReply::new("💤 AFK Status Set", reply::ORANGE)
            .description(format!(
                "**{}** is now AFK!",
                invocation.user.display_name
            ))
            .field("💬 Reason", reason, false)
            .field("⏰ Expected Back", expected_back, false)
            .footer("You'll be automatically removed from AFK when you send a message")
            .thumbnail(invocation.user.avatar_url.clone())
            .into())
    }
}
