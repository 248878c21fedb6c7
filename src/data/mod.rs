//! Persistence layer.
//!
//! Repository structs wrap a borrowed `DatabaseConnection` and perform all SeaORM
//! queries, converting entity models into domain models before returning them. Emoji
//! statistics are not relational and live in a JSON file managed by `EmojiStatsStore`.

pub mod afk;
pub mod call_session;
pub mod emoji_stats;
pub mod settings;
pub mod spam_stats;
pub mod user;

#[cfg(test)]
mod test;
