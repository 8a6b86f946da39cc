use sea_orm::DbErr;

use crate::model::parse_snowflake;

/// Welcome message template with its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeMessage {
    pub id: i32,
    pub guild_id: u64,
    /// Image shown in the welcome embed.
    pub image_url: String,
    /// Template text; supports `{user}` and `{username}` placeholders.
    pub message: String,
}

impl WelcomeMessage {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::welcome_message::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake("guild_id", &entity.guild_id)?,
            image_url: entity.image_url,
            message: entity.message,
        })
    }

    /// Substitutes the placeholders for a concrete user.
    ///
    /// # Arguments
    /// - `user_id` - Rendered as a mention for `{user}`
    /// - `username` - Rendered verbatim for `{username}`
    pub fn render(&self, user_id: u64, username: &str) -> String {
        self.message
            .replace("{user}", &format!("<@{}>", user_id))
            .replace("{username}", username)
    }
}

/// Parameters for creating a welcome message.
#[derive(Debug, Clone)]
pub struct CreateWelcomeMessageParam {
    pub guild_id: u64,
    pub image_url: String,
    pub message: String,
}
