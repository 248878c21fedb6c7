//! Discord bot integration.
//!
//! The bot listens to gateway events through [`handler::Handler`] and answers slash and
//! `!` prefix commands from the [`command::CommandRegistry`]. Command logic produces
//! platform-neutral [`reply::Reply`] values which are converted into serenity builders
//! only at the edge.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and permission data for the cache
//! - `GUILD_MESSAGES` - Receive messages in guilds
//! - `MESSAGE_CONTENT` - Read message content for prefix commands and statistics
//!   (privileged intent)
//! - `GUILD_MEMBERS` - Member data for display names (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice channel joins and leaves for call tracking
//!
//! Note: privileged intents must be explicitly enabled in the Discord Developer Portal
//! for the bot application.

pub mod command;
pub mod handler;
pub mod reply;
pub mod start;
