pub use super::afk_status::Entity as AfkStatus;
pub use super::call_session::Entity as CallSession;
pub use super::due_item::Entity as DueItem;
pub use super::finance::Entity as Finance;
pub use super::game_preference::Entity as GamePreference;
pub use super::guild_settings::Entity as GuildSettings;
pub use super::spam_stats::Entity as SpamStats;
pub use super::user::Entity as User;
pub use super::user_settings::Entity as UserSettings;
