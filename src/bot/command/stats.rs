//! `!emojistats`, `!spamstats`, `!callstats` and `!graph`.

use std::str::FromStr;

use async_trait::async_trait;

use crate::{
    bot::{
        command::{ArgSpec, Command, CommandKind, CommandSpec, Invocation},
        reply::{self, EmbedReply, Reply},
    },
    error::{command::CommandError, AppError},
    model::{call_session::CallStats, emoji::top_n},
    service::{
        statistics::StatisticsService,
        visualization::{
            activity_matrix, render_bar_chart, render_heatmap, render_share_chart,
            EMOJI_CHART_LIMIT,
        },
    },
    state::BotContext,
    util::time::format_hms,
};

/// Entries listed per emoji category.
const TOP_EMOJI: usize = 5;

fn user_arg() -> ArgSpec {
    ArgSpec::user("user", "Member to show statistics for")
}

fn lines(entries: &[(String, u64)]) -> String {
    entries
        .iter()
        .map(|(key, count)| format!("{}: {}", key, count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct EmojiStatsCommand;

#[async_trait]
impl Command for EmojiStatsCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "emojistats",
            "Show emoji usage statistics",
            CommandKind::Prefix,
        )
        .arg(user_arg())
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let target = invocation.target_user("user");

        let Some(stats) = StatisticsService::new(ctx).emoji_stats(target.id).await else {
            return Ok(Reply::text(format!(
                "No emoji statistics found for {}.",
                target.display_name
            )));
        };

        let mut embed = EmbedReply::new(
            format!("😀 Emoji Statistics for {}", target.display_name),
            reply::BLUE,
        )
        .field("Total Emojis Used", stats.total_emojis.to_string(), false);

        for (name, counts) in [
            ("Top Unicode", &stats.unicode_emojis),
            ("Top Emoticons", &stats.text_emoticons),
            ("Top Custom", &stats.custom_emojis),
        ] {
            let top = top_n(counts, TOP_EMOJI);
            if !top.is_empty() {
                embed = embed.field(name, lines(&top), true);
            }
        }

        Ok(embed.into())
    }
}

pub struct SpamStatsCommand;

#[async_trait]
impl Command for SpamStatsCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new("spamstats", "Show spam statistics", CommandKind::Prefix).arg(user_arg())
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let target = invocation.target_user("user");
        let stats = StatisticsService::new(ctx).spam_stats(target.id).await?;

        if stats.is_empty() {
            return Ok(Reply::text(format!(
                "No spam statistics found for {}.",
                target.display_name
            )));
        }

        let total: i64 = stats.iter().map(|stat| i64::from(stat.count)).sum();
        let embed = stats.iter().fold(
            EmbedReply::new(
                format!("🚫 Spam Statistics for {}", target.display_name),
                reply::RED,
            ),
            |embed, stat| {
                embed.field(
                    stat.display_name(),
                    format!(
                        "{} times\nLast: {}",
                        stat.count,
                        stat.last_triggered.format("%Y-%m-%d %H:%M")
                    ),
                    true,
                )
            },
        );

        Ok(embed
            .footer(format!("Total Spam Detections: {}", total))
            .into())
    }
}

pub struct CallStatsCommand;

#[async_trait]
impl Command for CallStatsCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new("callstats", "Show voice call statistics", CommandKind::Prefix)
            .arg(user_arg())
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let target = invocation.target_user("user");
        let sessions = StatisticsService::new(ctx).call_sessions(target.id).await?;

        if sessions.is_empty() {
            return Ok(Reply::text(format!(
                "No call statistics found for {}.",
                target.display_name
            )));
        }

        let stats = CallStats::from_sessions(&sessions);
        let mut embed = EmbedReply::new(
            format!("📞 Call Statistics for {}", target.display_name),
            reply::GREEN,
        )
        .field("Total Time", format_hms(stats.total_seconds), true)
        .field("Total Sessions", stats.sessions.to_string(), true)
        .field("Longest Call", format_hms(stats.longest_seconds), true);

        if let Some(average) = stats.average_seconds() {
            embed = embed.field("Average Duration", format_hms(average), true);
        }

        Ok(embed.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphType {
    Activity,
    Emoji,
    Spam,
}

impl FromStr for GraphType {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activity" => Ok(Self::Activity),
            "emoji" => Ok(Self::Emoji),
            "spam" => Ok(Self::Spam),
            _ => Err(CommandError::InvalidGraphType(s.to_string())),
        }
    }
}

/// `!graph [activity|emoji|spam]` for the invoking user.
pub struct GraphCommand;

#[async_trait]
impl Command for GraphCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "graph",
            "Show a statistics chart: activity, emoji or spam",
            CommandKind::Prefix,
        )
        .arg(ArgSpec::text("type", "Chart to show"))
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let graph_type = invocation
            .text("type")
            .map(GraphType::from_str)
            .transpose()?
            .unwrap_or(GraphType::Activity);
        let service = StatisticsService::new(ctx);
        let user_id = invocation.user.id;

        let (title, chart) = match graph_type {
            GraphType::Activity => {
                let sessions = service.call_sessions(user_id).await?;
                ("Activity Heatmap", render_heatmap(&activity_matrix(&sessions)))
            }
            GraphType::Emoji => {
                let Some(stats) = service.emoji_stats(user_id).await else {
                    return Ok(Reply::text("No emoji stats found."));
                };
                let top = top_n(&stats.combined(), EMOJI_CHART_LIMIT);
                if top.is_empty() {
                    return Ok(Reply::text("No emoji usage recorded."));
                }
                ("Emoji Usage", render_share_chart(&top))
            }
            GraphType::Spam => {
                let stats = service.spam_stats(user_id).await?;
                if stats.is_empty() {
                    return Ok(Reply::text("No spam stats found."));
                }
                let counts: Vec<(String, u64)> = stats
                    .iter()
                    .map(|stat| (stat.display_name(), stat.count.max(0) as u64))
                    .collect();
                ("Spam Statistics", render_bar_chart(&counts))
            }
        };

        Ok(EmbedReply::new(title, reply::BLUE)
            .description(format!("```\n{}\n```", chart))
            .into())
    }
}
