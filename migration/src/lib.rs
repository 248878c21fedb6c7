pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_table;
mod m20261001_000002_create_afk_status_table;
mod m20261001_000003_create_call_sessions_table;
mod m20261001_000004_create_spam_stats_table;
mod m20261001_000005_create_guild_settings_table;
mod m20261001_000006_create_user_settings_table;
mod m20261001_000007_create_finances_table;
mod m20261001_000008_create_due_items_table;
mod m20261001_000009_create_game_prefs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users_table::Migration),
            Box::new(m20261001_000002_create_afk_status_table::Migration),
            Box::new(m20261001_000003_create_call_sessions_table::Migration),
            Box::new(m20261001_000004_create_spam_stats_table::Migration),
            Box::new(m20261001_000005_create_guild_settings_table::Migration),
            Box::new(m20261001_000006_create_user_settings_table::Migration),
            Box::new(m20261001_000007_create_finances_table::Migration),
            Box::new(m20261001_000008_create_due_items_table::Migration),
            Box::new(m20261001_000009_create_game_prefs_table::Migration),
        ]
    }
}
