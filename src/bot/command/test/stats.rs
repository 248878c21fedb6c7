use chrono::TimeDelta;
use test_utils::{builder::TestBuilder, factory};

use super::*;
use crate::{
    bot::command::{
        execute,
        stats::{CallStatsCommand, EmojiStatsCommand, GraphCommand, SpamStatsCommand},
        Command,
    },
    error::AppError,
    service::statistics::StatisticsService,
    state::test_support::test_context,
};

/// Tests the not-found replies of the three statistics commands.
///
/// Expected: plain text naming the user, never an error
#[tokio::test]
async fn reports_missing_statistics() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (ctx, _dir) = test_context(db).await;
    let invocation = invocation(3, &[]);

    assert_eq!(
        expect_text(EmojiStatsCommand.run(&ctx, &invocation).await?),
        "No emoji statistics found for tester."
    );
    assert_eq!(
        expect_text(SpamStatsCommand.run(&ctx, &invocation).await?),
        "No spam statistics found for tester."
    );
    assert_eq!(
        expect_text(CallStatsCommand.run(&ctx, &invocation).await?),
        "No call statistics found for tester."
    );

    Ok(())
}

/// Tests `!emojistats` after a tracked message.
///
/// Expected: total and per-category top lists
#[tokio::test]
async fn shows_emoji_statistics() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (ctx, _dir) = test_context(db).await;
    StatisticsService::new(&ctx)
        .process_message(GUILD_ID, 3, "🎉🎉 <:pepe:1> :)", fixed_now())
        .await;

    let embed = expect_embed(EmojiStatsCommand.run(&ctx, &invocation(3, &[])).await?);

    assert_eq!(embed.title, "😀 Emoji Statistics for tester");
    assert_eq!(embed.field_value("Total Emojis Used"), Some("4"));
    assert_eq!(embed.field_value("Top Unicode"), Some("🎉: 2"));
    assert_eq!(embed.field_value("Top Emoticons"), Some(":): 1"));
    assert_eq!(embed.field_value("Top Custom"), Some("pepe: 1"));

    Ok(())
}

/// Tests `!spamstats` for a mentioned member.
///
/// Expected: one field per category and the total in the footer
#[tokio::test]
async fn shows_spam_statistics_for_target() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_spam_stats(db, user.user_id, "caps_spam", 3).await?;
    factory::create_spam_stats(db, user.user_id, "char_repetition", 2).await?;
    let (ctx, _dir) = test_context(db).await;

    let mut invocation = invocation(3, &[]);
    invocation.args.insert(
        "user".to_string(),
        ArgValue::User(command_user(user.user_id as u64, "spammer")),
    );

    let embed = expect_embed(SpamStatsCommand.run(&ctx, &invocation).await?);

    assert_eq!(embed.title, "🚫 Spam Statistics for spammer");
    assert!(embed.field_value("Caps Spam").unwrap().starts_with("3 times\nLast: "));
    assert!(embed.field_value("Char Repetition").unwrap().starts_with("2 times"));
    assert_eq!(embed.footer.as_deref(), Some("Total Spam Detections: 5"));

    Ok(())
}

/// Tests `!callstats` over closed and open sessions.
///
/// Expected: totals over closed sessions only
#[tokio::test]
async fn shows_call_statistics() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let start = fixed_now();
    for (offset, length) in [(0, 3_600), (10_000, 1_800)] {
        let join = start + TimeDelta::seconds(offset);
        factory::call_session::CallSessionFactory::new(db, user.user_id)
            .join_ts(join)
            .leave_ts(join + TimeDelta::seconds(length))
            .build()
            .await?;
    }
    factory::create_call_session(db, user.user_id).await?;
    let (ctx, _dir) = test_context(db).await;

    let embed = expect_embed(
        CallStatsCommand
            .run(&ctx, &invocation(user.user_id as u64, &[]))
            .await?,
    );

    assert_eq!(embed.field_value("Total Time"), Some("1h 30m 0s"));
    assert_eq!(embed.field_value("Total Sessions"), Some("2"));
    assert_eq!(embed.field_value("Longest Call"), Some("1h 0m 0s"));
    assert_eq!(embed.field_value("Average Duration"), Some("0h 45m 0s"));

    Ok(())
}

/// Tests the default graph and an unknown graph type.
///
/// Expected: activity heatmap in a code block; error embed for the unknown type
#[tokio::test]
async fn graph_defaults_to_activity() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (ctx, _dir) = test_context(db).await;

    let embed = expect_embed(execute(&ctx, &GraphCommand, &invocation(3, &[])).await);
    assert_eq!(embed.title, "Activity Heatmap");
    assert!(embed.description.unwrap().starts_with("```\n"));

    let embed = expect_embed(
        execute(&ctx, &GraphCommand, &invocation(3, &[("type", "pie")])).await,
    );
    assert_eq!(
        embed.description.as_deref(),
        Some("Invalid graph type. Options: activity, emoji, spam")
    );
}

/// Tests the spam graph with and without data.
///
/// Expected: text reply when empty, bar chart otherwise
#[tokio::test]
async fn graph_renders_spam_chart() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let (ctx, _dir) = test_context(db).await;
    let invocation = invocation(user.user_id as u64, &[("type", "spam")]);

    assert_eq!(
        expect_text(GraphCommand.run(&ctx, &invocation).await?),
        "No spam stats found."
    );

    factory::create_spam_stats(db, user.user_id, "caps_spam", 4).await?;
    let embed = expect_embed(GraphCommand.run(&ctx, &invocation).await?);

    assert_eq!(embed.title, "Spam Statistics");
    assert!(embed.description.unwrap().contains("Caps Spam"));

    Ok(())
}
