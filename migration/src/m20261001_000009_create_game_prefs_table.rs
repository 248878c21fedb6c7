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
                    .table(GamePrefs::Table)
                    .if_not_exists()
                    .col(pk_auto(GamePrefs::Id))
                    .col(big_integer(GamePrefs::UserId))
                    .col(string_len(GamePrefs::GameName, 255))
                    .col(integer(GamePrefs::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_prefs_user_id")
                            .from(GamePrefs::Table, GamePrefs::UserId)
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
                    .name("idx_game_prefs_user_game")
                    .table(GamePrefs::Table)
                    .col(GamePrefs::UserId)
                    .col(GamePrefs::GameName)
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
                    .name("idx_game_prefs_user_game")
                    .table(GamePrefs::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GamePrefs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GamePrefs {
    Table,
    Id,
    UserId,
    GameName,
    Position,
}
