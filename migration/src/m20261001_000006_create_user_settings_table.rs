use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSettings::Table)
                    .if_not_exists()
                    .col(big_integer(UserSettings::UserId).primary_key())
                    .col(boolean(UserSettings::OptOut).default(false))
                    .col(json(UserSettings::Settings))
                    .col(timestamp_with_time_zone(UserSettings::CreatedAt))
                    .col(timestamp_with_time_zone(UserSettings::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSettings {
    Table,
    UserId,
    OptOut,
    Settings,
    CreatedAt,
    UpdatedAt,
}
