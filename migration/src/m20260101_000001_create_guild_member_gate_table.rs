use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildMemberGate::Table)
                    .if_not_exists()
                    .col(string(GuildMemberGate::GuildId).primary_key())
                    .col(string_null(GuildMemberGate::MemberRoleId))
                    .col(string_null(GuildMemberGate::RulesChannelId))
                    .col(string_null(GuildMemberGate::GateChannelId))
                    .col(string_null(GuildMemberGate::WelcomeChannelId))
                    .col(big_integer_null(GuildMemberGate::RemoveTimeHours))
                    .col(big_integer_null(GuildMemberGate::ReminderTimeHours))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildMemberGate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildMemberGate {
    Table,
    GuildId,
    MemberRoleId,
    RulesChannelId,
    GateChannelId,
    WelcomeChannelId,
    RemoveTimeHours,
    ReminderTimeHours,
}
