use std::time::Duration;

use test_utils::builder::TestBuilder;

use super::*;
use crate::{
    bot::command::{execute, ping::PingCommand},
    state::test_support::test_context,
};

/// Tests `/ping` once the shard has a measured heartbeat.
///
/// Expected: green embed with the latency in milliseconds
#[tokio::test]
async fn reports_heartbeat_latency() {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (ctx, _dir) = test_context(db).await;

    let mut invocation = invocation(1, &[]);
    invocation.latency = Some(Duration::from_micros(42_340));

    let embed = expect_embed(execute(&ctx, &PingCommand, &invocation).await);

    assert_eq!(embed.title, "🏓 Pong!");
    assert_eq!(embed.description.as_deref(), Some("Bot latency: 42.34ms"));
}

/// Tests `/ping` before the first heartbeat was acknowledged.
///
/// Expected: the latency is reported as unavailable
#[tokio::test]
async fn latency_unavailable_before_first_heartbeat() {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (ctx, _dir) = test_context(db).await;

    let embed = expect_embed(execute(&ctx, &PingCommand, &invocation(1, &[])).await);

    assert_eq!(
        embed.description.as_deref(),
        Some("Bot latency: unavailable")
    );
}
