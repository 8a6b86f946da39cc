use std::time::Duration;

use crate::{
    data::BlacklistedWordRepository,
    discord::{mention_user, outbound},
    error::AppError,
    model::{
        blacklisted_word::{BlacklistedWord, CreateBlacklistedWordParam, FilterMethod},
        event::IncomingMessage,
    },
    service::audit_log::AuditLogService,
    state::BotState,
};

const FILTER_NOTICE_LIFETIME: Duration = Duration::from_secs(60);

/// Deletes guild messages containing blacklisted words.
pub struct WordFilterService<'a> {
    state: &'a BotState,
}

impl<'a> WordFilterService<'a> {
    pub fn new(state: &'a BotState) -> Self {
        Self { state }
    }

    pub async fn add_word(
        &self,
        guild_id: u64,
        word: &str,
        method: FilterMethod,
    ) -> Result<BlacklistedWord, AppError> {
        Ok(BlacklistedWordRepository::new(&self.state.db)
            .create(CreateBlacklistedWordParam {
                guild_id,
                word: word.to_string(),
                method,
            })
            .await?)
    }

    /// Whether a message of a guild trips any of its filters.
    pub async fn is_filtered(&self, guild_id: u64, content: &str) -> Result<bool, AppError> {
        let words = BlacklistedWordRepository::new(&self.state.db)
            .get_by_guild_id(guild_id)
            .await?;

        Ok(words.iter().any(|word| word.matches(content)))
    }

    /// Checks a created or edited message and removes it if filtered.
    ///
    /// Private messages and messages by bots are never filtered.
    ///
    /// # Returns
    /// - `Ok(true)`: Message was filtered and further processing must stop
    /// - `Ok(false)`: Message is clean
    pub async fn check_message(&self, message: &IncomingMessage) -> Result<bool, AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(false);
        };
        if message.author_is_bot || !self.is_filtered(guild_id, &message.content).await? {
            return Ok(false);
        }

        tracing::info!(
            "Filtered message {} of user {} in channel {}",
            message.message_id,
            message.author_id,
            message.channel_id
        );

        outbound::delete(&self.state.discord, message.channel_id, message.message_id).await;
        AuditLogService::new(self.state)
            .report_filtered_message(message.author_id, message.channel_id, &message.content)
            .await;
        outbound::send_expiring(
            &self.state.discord,
            message.channel_id,
            &format!(
                "{} Your message has been deleted it contained banned word(s). Please watch your language.",
                mention_user(message.author_id)
            ),
            FILTER_NOTICE_LIFETIME,
        )
        .await;

        Ok(true)
    }
}
