//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories that depend on a user row take the user id
//! explicitly, so tests stay in control of which rows exist.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let afk = factory::afk_status::create_afk_status(&db, user.user_id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let session = factory::call_session::CallSessionFactory::new(&db, user.user_id)
//!     .join_ts(join)
//!     .leave_ts(leave)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `afk_status` - Create AFK status entities
//! - `call_session` - Create voice call session entities
//! - `spam_stats` - Create spam counter entities
//! - `settings` - Create guild and user settings entities
//! - `helpers` - Unique id generation

pub mod afk_status;
pub mod call_session;
pub mod helpers;
pub mod settings;
pub mod spam_stats;
pub mod user;

pub use afk_status::create_afk_status;
pub use call_session::create_call_session;
pub use settings::{create_guild_settings, create_user_settings};
pub use spam_stats::create_spam_stats;
pub use user::{create_user, create_user_with_id};
