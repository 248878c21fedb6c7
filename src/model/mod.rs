//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entity models into these types at the data layer boundary
//! so services and command handlers never depend on the database representation.

pub mod afk;
pub mod call_session;
pub mod currency;
pub mod emoji;
pub mod settings;
pub mod spam;
pub mod user;
