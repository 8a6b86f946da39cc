use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberGateQuestion::Table)
                    .if_not_exists()
                    .col(string(MemberGateQuestion::UserId).primary_key())
                    .col(string(MemberGateQuestion::GuildId))
                    .col(text(MemberGateQuestion::Question))
                    .col(text(MemberGateQuestion::Answer))
                    .col(timestamp_with_time_zone(MemberGateQuestion::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberGateQuestion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemberGateQuestion {
    Table,
    UserId,
    GuildId,
    Question,
    Answer,
    CreatedAt,
}
