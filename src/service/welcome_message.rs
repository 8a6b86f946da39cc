use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    data::WelcomeMessageRepository,
    discord::{outbound, DiscordApi, OutgoingEmbed},
    error::AppError,
    model::welcome_message::{CreateWelcomeMessageParam, WelcomeMessage},
    service::random_index,
};

pub struct WelcomeMessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeMessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_welcome_messages(&self, guild_id: u64) -> Result<Vec<WelcomeMessage>, AppError> {
        Ok(WelcomeMessageRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?)
    }

    pub async fn add_welcome_message(
        &self,
        param: CreateWelcomeMessageParam,
    ) -> Result<WelcomeMessage, AppError> {
        Ok(WelcomeMessageRepository::new(self.db).create(param).await?)
    }

    pub async fn remove_welcome_message(&self, id: i32) -> Result<bool, AppError> {
        Ok(WelcomeMessageRepository::new(self.db).delete(id).await?)
    }

    /// Picks one of the guild's welcome messages uniformly at random.
    pub async fn random_welcome_message(
        &self,
        guild_id: u64,
    ) -> Result<Option<WelcomeMessage>, AppError> {
        let mut messages = self.get_welcome_messages(guild_id).await?;

        Ok(random_index(messages.len()).map(|i| messages.swap_remove(i)))
    }

    /// Posts a random welcome message for a user into a channel.
    ///
    /// The template is rendered for the user and sent as an embed with the
    /// configured image, mentioning the user in the message content so they
    /// get notified.
    ///
    /// # Returns
    /// - `Ok(true)`: A welcome message was picked and sent (send failures are logged)
    /// - `Ok(false)`: The guild has no welcome messages
    pub async fn welcome(
        &self,
        discord: &Arc<dyn DiscordApi>,
        guild_id: u64,
        channel_id: u64,
        user_id: u64,
        username: &str,
    ) -> Result<bool, AppError> {
        let Some(message) = self.random_welcome_message(guild_id).await? else {
            return Ok(false);
        };

        let embed = OutgoingEmbed {
            description: Some(message.render(user_id, username)),
            image_url: Some(message.image_url.clone()),
            ..Default::default()
        };
        let mention = crate::discord::mention_user(user_id);
        outbound::send_embed(discord, channel_id, Some(&mention), &embed).await;

        tracing::debug!("Welcomed user {} in guild {}", user_id, guild_id);

        Ok(true)
    }
}
