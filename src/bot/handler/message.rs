//! Message listener.
//!
//! Every non-bot message is checked in order for: the author returning from AFK, AFK
//! users being mentioned, guild statistics, and finally a `!` prefix command.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serenity::all::{ChannelId, Context, Message};

use crate::{
    bot::{
        command::{bind_prefix_args, execute, CommandUser, Invocation},
        handler::command_user,
        reply::{self, EmbedReply, Reply},
    },
    error::AppError,
    model::afk::AfkStatus,
    service::{afk::describe_expected_back, afk::AfkService, statistics::StatisticsService},
    state::BotContext,
    util::time::{format_hours_minutes, format_short},
};

const WELCOME_BACK_DELETE_AFTER: Duration = Duration::from_secs(10);
const AFK_MENTION_DELETE_AFTER: Duration = Duration::from_secs(30);

/// Handle a message sent in any channel the bot can see
pub async fn handle_message(bot: &BotContext, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let now = Utc::now();
    let author = command_user(&message.author);
    let mentions: Vec<CommandUser> = message.mentions.iter().map(command_user).collect();

    match afk_replies(bot, &author, &mentions, now).await {
        Ok(replies) => {
            for reply in &replies {
                send_reply(&ctx, message.channel_id, reply).await;
            }
        }
        Err(e) => tracing::error!("Failed to process AFK state for {}: {}", author.id, e),
    }

    if let Some(guild_id) = message.guild_id {
        StatisticsService::new(bot)
            .process_message(guild_id.get(), author.id, &message.content, now)
            .await;
    }

    let Some((command, tokens)) = bot.commands.parse_prefix(&message.content) else {
        return;
    };

    let mut invocation = Invocation::new(author, message.guild_id.map(|id| id.get()), now);
    invocation.is_admin = message
        .author_permissions(&ctx.cache)
        .map(|permissions| permissions.administrator())
        .unwrap_or(false);

    let reply = match bind_prefix_args(&command.spec(), &tokens, &mentions) {
        Ok(args) => {
            invocation.args = args;
            execute(bot, command.as_ref(), &invocation).await
        }
        Err(e) => Reply::error(e.to_string()),
    };

    send_reply(&ctx, message.channel_id, &reply).await;
}

/// Replies owed to a message because of AFK statuses.
///
/// Clears the author's own status first, then reports every other mentioned user who
/// is AFK.
pub async fn afk_replies(
    bot: &BotContext,
    author: &CommandUser,
    mentions: &[CommandUser],
    now: DateTime<Utc>,
) -> Result<Vec<Reply>, AppError> {
    let service = AfkService::new(&bot.db);
    let mut replies = Vec::new();

    if let Some(away_for) = service.clear_on_return(author.id, now).await? {
        replies.push(welcome_back_reply(author, away_for));
    }

    let mentioned_ids: Vec<u64> = mentions
        .iter()
        .map(|user| user.id)
        .filter(|id| *id != author.id)
        .collect();

    for mention in service.mentioned_afk(&mentioned_ids).await? {
        if let Some(user) = mentions.iter().find(|user| user.id == mention.user_id) {
            replies.push(afk_mention_reply(user, &mention.status, now));
        }
    }

    Ok(replies)
}

pub fn welcome_back_reply(user: &CommandUser, away_for: TimeDelta) -> Reply {
    EmbedReply::new("👋 Welcome Back!", reply::GREEN)
        .description(format!(
            "**{}**, your AFK status has been removed.",
            user.display_name
        ))
        .field("⏱️ AFK Duration", format_hours_minutes(away_for), false)
        .delete_after(WELCOME_BACK_DELETE_AFTER)
        .into()
}

pub fn afk_mention_reply(user: &CommandUser, status: &AfkStatus, now: DateTime<Utc>) -> Reply {
    let mut embed = EmbedReply::new("💤 User is AFK", reply::ORANGE)
        .description(format!("**{}** is currently AFK.", user.display_name))
        .thumbnail(user.avatar_url.clone());

    if let Some(reason) = &status.reason {
        embed = embed.field("💬 Reason", reason, false);
    }
    if let Some(expected_back) = describe_expected_back(status, now) {
        embed = embed.field("⏰ Expected Back", expected_back, false);
    }

    embed
        .field(
            "⏱️ AFK Since",
            format!("{} ago", format_short(status.elapsed(now))),
            false,
        )
        .delete_after(AFK_MENTION_DELETE_AFTER)
        .into()
}

/// Sends a reply and schedules its deletion when the reply asks for it.
async fn send_reply(ctx: &Context, channel_id: ChannelId, reply: &Reply) {
    let sent = match channel_id.send_message(&ctx.http, reply.to_message()).await {
        Ok(sent) => sent,
        Err(e) => {
            tracing::error!("Failed to send reply in channel {}: {}", channel_id, e);
            return;
        }
    };

    let Some(after) = reply.delete_after() else {
        return;
    };

    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if let Err(e) = http.delete_message(channel_id, sent.id, None).await {
            tracing::warn!("Failed to delete message {} in {}: {}", sent.id, channel_id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::{
        bot::command::{afk::AfkCommand, ArgValue, Command},
        data::afk::AfkRepository,
        state::test_support::test_context,
    };

    fn user(id: u64, name: &str) -> CommandUser {
        CommandUser {
            id,
            name: name.to_string(),
            display_name: name.to_string(),
            avatar_url: Some(format!("https://cdn.example/avatars/{}.png", id)),
        }
    }

    fn expect_embed(reply: &Reply) -> &EmbedReply {
        match reply {
            Reply::Embed(embed) => embed,
            Reply::Text(text) => panic!("expected an embed, got text: {}", text),
        }
    }

    /// Tests `/afk reason=lunch expected_back=2h` followed by a message.
    ///
    /// Expected: the status is cleared and the welcome back reports `0h 0m`
    #[tokio::test]
    async fn returning_author_is_welcomed_back() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (bot, _dir) = test_context(db).await;
        let author = user(5, "napper");
        let now = Utc::now();

        let mut invocation = Invocation::new(author.clone(), Some(1), now);
        invocation.args.insert(
            "reason".to_string(),
            ArgValue::Text("lunch".to_string()),
        );
        invocation.args.insert(
            "expected_back".to_string(),
            ArgValue::Text("2h".to_string()),
        );
        AfkCommand.run(&bot, &invocation).await?;

        let replies = afk_replies(&bot, &author, &[], now).await?;

        assert_eq!(replies.len(), 1);
        let embed = expect_embed(&replies[0]);
        assert_eq!(embed.title, "👋 Welcome Back!");
        assert_eq!(embed.field_value("⏱️ AFK Duration"), Some("0h 0m"));
        assert_eq!(embed.delete_after, Some(WELCOME_BACK_DELETE_AFTER));
        assert!(AfkRepository::new(db).find_by_user(5).await?.is_none());

        // Already cleared
        assert!(afk_replies(&bot, &author, &[], now).await?.is_empty());

        Ok(())
    }

    /// Tests mentioning an AFK user.
    ///
    /// Expected: one AFK notice for the AFK user, none for the others
    #[tokio::test]
    async fn mentioned_afk_user_is_reported() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (bot, _dir) = test_context(db).await;
        let set_at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let now = set_at + TimeDelta::minutes(90);

        let mut invocation = Invocation::new(user(6, "away"), Some(1), set_at);
        invocation.args.insert(
            "expected_back".to_string(),
            ArgValue::Text("2h".to_string()),
        );
        AfkCommand.run(&bot, &invocation).await?;

        let replies = afk_replies(
            &bot,
            &user(7, "talker"),
            &[user(6, "away"), user(8, "present")],
            now,
        )
        .await?;

        assert_eq!(replies.len(), 1);
        let embed = expect_embed(&replies[0]);
        assert_eq!(embed.description.as_deref(), Some("**away** is currently AFK."));
        assert_eq!(embed.field_value("💬 Reason"), None);
        assert_eq!(embed.field_value("⏰ Expected Back"), Some("in ~30m"));
        assert_eq!(embed.field_value("⏱️ AFK Since"), Some("1h 30m ago"));
        assert_eq!(
            embed.thumbnail.as_deref(),
            Some("https://cdn.example/avatars/6.png")
        );

        Ok(())
    }

    #[test]
    fn afk_mention_after_expected_back_says_soon() {
        let set_at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let status = AfkStatus {
            user_id: 6,
            reason: Some("gym".to_string()),
            expected_back: Some(set_at + TimeDelta::minutes(30)),
            set_at,
        };

        let reply = afk_mention_reply(&user(6, "away"), &status, set_at + TimeDelta::minutes(45));
        let embed = expect_embed(&reply);

        assert_eq!(embed.field_value("💬 Reason"), Some("gym"));
        assert_eq!(embed.field_value("⏰ Expected Back"), Some("Should be back soon"));
        assert_eq!(embed.field_value("⏱️ AFK Since"), Some("45m ago"));
    }
}
