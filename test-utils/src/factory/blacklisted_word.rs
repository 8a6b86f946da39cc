//! Factory for filtered words.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a blacklisted word for a guild.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the word is filtered in
/// - `word` - Filtered word
/// - `filter_method` - One of `EXACT`, `CONTAINS`, `STARTS_WITH`, `ENDS_WITH`
pub async fn create_blacklisted_word(
    db: &DatabaseConnection,
    guild_id: &str,
    word: &str,
    filter_method: &str,
) -> Result<entity::blacklisted_word::Model, DbErr> {
    entity::blacklisted_word::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        word: ActiveValue::Set(word.to_string()),
        filter_method: ActiveValue::Set(filter_method.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}
