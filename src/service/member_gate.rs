use sea_orm::DatabaseConnection;

use crate::{
    data::{GateQuestionRepository, GuildMemberGateRepository, WelcomeMessageRepository},
    error::AppError,
    model::member_gate::{GateChannel, GateTimer, GuildGateConfig},
    service::random_index,
};

/// Reads and mutates a guild's member gate configuration and questions.
pub struct MemberGateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberGateService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a guild's configuration, or an empty one if none is stored.
    pub async fn get_config(&self, guild_id: u64) -> Result<GuildGateConfig, AppError> {
        let repo = GuildMemberGateRepository::new(self.db);

        Ok(repo
            .find_by_guild_id(guild_id)
            .await?
            .unwrap_or_else(|| GuildGateConfig::new(guild_id)))
    }

    pub async fn set_channel(
        &self,
        guild_id: u64,
        slot: GateChannel,
        channel_id: u64,
    ) -> Result<(), AppError> {
        self.update(guild_id, |config| match slot {
            GateChannel::Welcome => config.welcome_channel_id = Some(channel_id),
            GateChannel::Gate => config.gate_channel_id = Some(channel_id),
            GateChannel::Rules => config.rules_channel_id = Some(channel_id),
        })
        .await
    }

    pub async fn set_member_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError> {
        self.update(guild_id, |config| config.member_role_id = Some(role_id))
            .await
    }

    /// Sets or clears (`None`) one of the gate timers.
    pub async fn set_timer(
        &self,
        guild_id: u64,
        timer: GateTimer,
        hours: Option<u64>,
    ) -> Result<(), AppError> {
        self.update(guild_id, |config| match timer {
            GateTimer::Purge => config.remove_time_hours = hours,
            GateTimer::Reminder => config.reminder_time_hours = hours,
        })
        .await
    }

    pub async fn get_questions(&self, guild_id: u64) -> Result<Vec<String>, AppError> {
        Ok(GateQuestionRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?)
    }

    /// Adds a question; returns `false` when it already existed.
    pub async fn add_question(&self, guild_id: u64, question: &str) -> Result<bool, AppError> {
        Ok(GateQuestionRepository::new(self.db)
            .create(guild_id, question)
            .await?)
    }

    pub async fn remove_question(&self, guild_id: u64, question: &str) -> Result<bool, AppError> {
        Ok(GateQuestionRepository::new(self.db)
            .delete(guild_id, question)
            .await?)
    }

    /// Picks one of the guild's questions uniformly at random.
    pub async fn random_question(&self, guild_id: u64) -> Result<Option<String>, AppError> {
        let mut questions = self.get_questions(guild_id).await?;

        Ok(random_index(questions.len()).map(|i| questions.swap_remove(i)))
    }

    /// Disables the approval gate.
    ///
    /// Wipes the questions, member role, gate channel and rules channel. The
    /// welcome settings and timers are kept.
    pub async fn reset_gate_settings(&self, guild_id: u64) -> Result<(), AppError> {
        GateQuestionRepository::new(self.db)
            .delete_by_guild_id(guild_id)
            .await?;
        self.update(guild_id, GuildGateConfig::clear_gate).await
    }

    /// Disables welcome messages by wiping the channel and every message.
    pub async fn reset_welcome_settings(&self, guild_id: u64) -> Result<(), AppError> {
        WelcomeMessageRepository::new(self.db)
            .delete_by_guild_id(guild_id)
            .await?;
        self.update(guild_id, |config| config.welcome_channel_id = None)
            .await
    }

    /// Removes everything the member gate stores for a guild.
    pub async fn reset_all_settings(&self, guild_id: u64) -> Result<(), AppError> {
        GateQuestionRepository::new(self.db)
            .delete_by_guild_id(guild_id)
            .await?;
        WelcomeMessageRepository::new(self.db)
            .delete_by_guild_id(guild_id)
            .await?;
        GuildMemberGateRepository::new(self.db)
            .delete(guild_id)
            .await?;

        Ok(())
    }

    async fn update<F>(&self, guild_id: u64, change: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut GuildGateConfig),
    {
        let mut config = self.get_config(guild_id).await?;
        change(&mut config);
        GuildMemberGateRepository::new(self.db)
            .upsert(&config)
            .await?;

        Ok(())
    }
}
