//! Factory for welcome messages.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a welcome message for a guild.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the message belongs to
/// - `image_url` - Image shown with the message
/// - `message` - Message template
///
/// # Returns
/// - `Ok(entity::welcome_message::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_welcome_message(
    db: &DatabaseConnection,
    guild_id: &str,
    image_url: &str,
    message: &str,
) -> Result<entity::welcome_message::Model, DbErr> {
    entity::welcome_message::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        image_url: ActiveValue::Set(image_url.to_string()),
        message: ActiveValue::Set(message.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}
