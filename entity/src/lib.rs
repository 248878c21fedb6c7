//! `SeaORM` entities for the companion bot schema.

pub mod prelude;

pub mod afk_status;
pub mod call_session;
pub mod due_item;
pub mod finance;
pub mod game_preference;
pub mod guild_settings;
pub mod spam_stats;
pub mod user;
pub mod user_settings;
