use async_trait::async_trait;

use crate::{
    bot::{
        command::{Command, CommandKind, CommandSpec, Invocation},
        reply::{self, EmbedReply, Reply},
    },
    error::AppError,
    state::BotContext,
};

/// `/ping` health check reporting the gateway heartbeat latency.
pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "ping",
            "Check if the bot is responsive",
            CommandKind::Slash,
        )
    }

    async fn run(&self, _ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        tracing::info!("Ping command used by {}", invocation.user.name);

        // No heartbeat has been acknowledged yet right after connecting
        let description = match invocation.latency {
            Some(latency) => format!("Bot latency: {:.2}ms", latency.as_secs_f64() * 1000.0),
            None => "Bot latency: unavailable".to_string(),
        };

        Ok(EmbedReply::new("🏓 Pong!", reply::GREEN)
            .description(description)
            .into())
    }
}
