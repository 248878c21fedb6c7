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
                    .table(SpamStats::Table)
                    .if_not_exists()
                    .col(pk_auto(SpamStats::Id))
                    .col(big_integer(SpamStats::UserId))
                    .col(string_len(SpamStats::SpamType, 50))
                    .col(integer(SpamStats::Count).default(0))
                    .col(timestamp_with_time_zone(SpamStats::LastTriggered))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_spam_stats_user_id")
                            .from(SpamStats::Table, SpamStats::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One counter row per user and spam category
        manager
            .create_index(
                Index::create()
                    .name("idx_spam_stats_user_type")
                    .table(SpamStats::Table)
                    .col(SpamStats::UserId)
                    .col(SpamStats::SpamType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_spam_stats_user_type")
                    .table(SpamStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SpamStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SpamStats {
    Table,
    Id,
    UserId,
    SpamType,
    Count,
    LastTriggered,
}
