use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AfkStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(AfkStatus::Id))
                    .col(big_integer_uniq(AfkStatus::UserId))
                    .col(string_null(AfkStatus::Reason))
                    .col(timestamp_with_time_zone_null(AfkStatus::ExpectedBack))
                    .col(timestamp_with_time_zone(AfkStatus::SetAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_afk_status_user_id")
                            .from(AfkStatus::Table, AfkStatus::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AfkStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AfkStatus {
    Table,
    Id,
    UserId,
    Reason,
    ExpectedBack,
    SetAt,
}
