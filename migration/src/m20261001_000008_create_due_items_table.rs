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
                    .table(DueItems::Table)
                    .if_not_exists()
                    .col(pk_auto(DueItems::ItemId))
                    .col(big_integer(DueItems::UserId))
                    .col(string_len(DueItems::Description, 500))
                    .col(
                        timestamp_with_time_zone(DueItems::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(DueItems::Completed).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_due_items_user_id")
                            .from(DueItems::Table, DueItems::UserId)
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
            .drop_table(Table::drop().table(DueItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DueItems {
    Table,
    ItemId,
    UserId,
    Description,
    CreatedAt,
    Completed,
}
