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
                    .table(CallSessions::Table)
                    .if_not_exists()
                    .col(pk_auto(CallSessions::SessionId))
                    .col(big_integer(CallSessions::UserId))
                    .col(big_integer(CallSessions::ChannelId))
                    .col(timestamp_with_time_zone(CallSessions::JoinTs))
                    .col(timestamp_with_time_zone_null(CallSessions::LeaveTs))
                    .col(big_integer_null(CallSessions::Duration))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_call_sessions_user_id")
                            .from(CallSessions::Table, CallSessions::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Open session lookups filter on user and a null leave timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_call_sessions_user_id")
                    .table(CallSessions::Table)
                    .col(CallSessions::UserId)
                    .col(CallSessions::LeaveTs)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_call_sessions_user_id")
                    .table(CallSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CallSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CallSessions {
    Table,
    SessionId,
    UserId,
    ChannelId,
    JoinTs,
    LeaveTs,
    Duration,
}
