//! Business logic.
//!
//! Services orchestrate repositories and the in-process caches held by `BotContext`.
//! They work purely with domain models and know nothing about Discord types, which keeps
//! every rule here testable without a gateway connection.

pub mod afk;
pub mod config_cache;
pub mod currency;
pub mod emoji;
pub mod spam;
pub mod statistics;
pub mod visualization;
