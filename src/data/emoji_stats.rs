//! File-backed store for per-user emoji statistics.
//!
//! The whole map is held in memory and rewritten to disk after every change that found
//! at least one emoji. Keys are user ids rendered as strings.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    model::emoji::{EmojiStats, EmojiUsage},
};

pub struct EmojiStatsStore {
    path: PathBuf,
    stats: Mutex<HashMap<String, EmojiStats>>,
}

impl EmojiStatsStore {
    /// Loads the statistics file at `path`.
    ///
    /// A missing file starts an empty store. A file that cannot be read or parsed is
    /// logged and also starts empty; it is overwritten on the next successful save.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let stats = match read_stats(&path).await {
            Ok(stats) => stats,
            Err(AppError::IoErr(e)) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::error!(
                    "Failed to load emoji stats from {}: {}",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        };

        tracing::debug!("Loaded emoji stats for {} users", stats.len());

        Self {
            path,
            stats: Mutex::new(stats),
        }
    }

    /// Adds a message's emoji usage to a user's counters and persists the file.
    ///
    /// Usage with no emoji at all is ignored and nothing is written.
    ///
    /// # Returns
    /// - `Ok(true)` - Counters updated and the file rewritten
    /// - `Ok(false)` - Nothing to record
    /// - `Err(AppError)` - Counters updated in memory but the file could not be written
    pub async fn record(
        &self,
        user_id: u64,
        usage: &EmojiUsage,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        if usage.is_empty() {
            return Ok(false);
        }

        let mut stats = self.stats.lock().await;

        let entry = stats.entry(user_id.to_string()).or_default();
        entry.apply(usage);
        entry.last_updated = now.to_rfc3339();

        write_stats(&self.path, &stats).await?;

        Ok(true)
    }

    /// Returns a snapshot of a user's counters.
    pub async fn get(&self, user_id: u64) -> Option<EmojiStats> {
        self.stats.lock().await.get(&user_id.to_string()).cloned()
    }
}

async fn read_stats(path: &Path) -> Result<HashMap<String, EmojiStats>, AppError> {
    let raw = tokio::fs::read(path).await?;
    let stats = serde_json::from_slice(&raw)?;

    Ok(stats)
}

async fn write_stats(path: &Path, stats: &HashMap<String, EmojiStats>) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(stats)?;
    tokio::fs::write(path, json).await?;

    Ok(())
}
