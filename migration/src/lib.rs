pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_guild_member_gate_table;
mod m20260101_000002_create_guild_member_gate_question_table;
mod m20260101_000003_create_member_gate_question_table;
mod m20260101_000004_create_welcome_message_table;
mod m20260102_000005_create_blacklisted_word_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_guild_member_gate_table::Migration),
            Box::new(m20260101_000002_create_guild_member_gate_question_table::Migration),
            Box::new(m20260101_000003_create_member_gate_question_table::Migration),
            Box::new(m20260101_000004_create_welcome_message_table::Migration),
            Box::new(m20260102_000005_create_blacklisted_word_table::Migration),
        ]
    }
}
