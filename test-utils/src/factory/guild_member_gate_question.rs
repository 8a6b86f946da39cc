//! Factory for candidate screening questions.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Creates a screening question for a guild.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the question belongs to
/// - `question` - Question text
///
/// # Returns
/// - `Ok(entity::guild_member_gate_question::Model)` - Created question row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_gate_question(
    db: &DatabaseConnection,
    guild_id: &str,
    question: &str,
) -> Result<entity::guild_member_gate_question::Model, DbErr> {
    entity::guild_member_gate_question::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        question: ActiveValue::Set(question.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a screening question with generated text.
pub async fn create_random_gate_question(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::guild_member_gate_question::Model, DbErr> {
    create_gate_question(db, guild_id, &format!("Question {}?", next_id())).await
}
