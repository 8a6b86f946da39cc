use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlacklistedWord::Table)
                    .if_not_exists()
                    .col(pk_auto(BlacklistedWord::Id))
                    .col(string(BlacklistedWord::GuildId))
                    .col(string(BlacklistedWord::Word))
                    .col(string(BlacklistedWord::FilterMethod))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlacklistedWord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BlacklistedWord {
    Table,
    Id,
    GuildId,
    Word,
    FilterMethod,
}
