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
                    .table(Finances::Table)
                    .if_not_exists()
                    .col(pk_auto(Finances::Id))
                    .col(big_integer(Finances::UserId))
                    .col(string_len(Finances::Currency, 3))
                    .col(double(Finances::Balance).default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_finances_user_id")
                            .from(Finances::Table, Finances::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_finances_user_currency")
                    .table(Finances::Table)
                    .col(Finances::UserId)
                    .col(Finances::Currency)
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
                    .name("idx_finances_user_currency")
                    .table(Finances::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Finances::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Finances {
    Table,
    Id,
    UserId,
    Currency,
    Balance,
}
