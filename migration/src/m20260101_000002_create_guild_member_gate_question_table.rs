use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildMemberGateQuestion::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildMemberGateQuestion::Id))
                    .col(string(GuildMemberGateQuestion::GuildId))
                    .col(text(GuildMemberGateQuestion::Question))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guild_member_gate_question_guild_question")
                    .table(GuildMemberGateQuestion::Table)
                    .col(GuildMemberGateQuestion::GuildId)
                    .col(GuildMemberGateQuestion::Question)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildMemberGateQuestion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildMemberGateQuestion {
    Table,
    Id,
    GuildId,
    Question,
}
