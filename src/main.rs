mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{
    config::Config, error::AppError, service::currency::HttpRateSource, state::BotContext,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Flushes the log file on drop, keep alive until exit
    let _log_guard = startup::init_tracing(&config)?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let rate_source = Arc::new(HttpRateSource::new(
        http_client,
        config.exchange_rate_url.clone(),
    ));
    let ctx = Arc::new(
        BotContext::new(
            db.clone(),
            config.spam.clone(),
            config.emoji_stats_file.clone(),
            rate_source,
        )
        .await?,
    );

    let client = bot::start::init_bot(&config, ctx).await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown requested, stopping shards");
                shard_manager.shutdown_all().await;
            }
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    if let Err(e) = bot::start::start_bot(client).await {
        tracing::error!("Discord bot error: {}", e);
    }

    db.close().await?;
    tracing::info!("Bot stopped");

    Ok(())
}
