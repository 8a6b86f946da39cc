//! Bot state shared across all event handlers and scheduled jobs.
//!
//! `BotState` is built once at startup and cloned into the serenity event
//! handler and the scheduler. Every field is cheap to clone: the database
//! connection is a pool, the Discord API sits behind an `Arc`, and the
//! sequence registry and notice board wrap `Arc<Mutex<..>>` internally.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    discord::DiscordApi,
    sequence::{notice::NoticeBoard, registry::SequenceRegistry},
};

/// Runtime settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Prefix every command alias must start with.
    pub command_prefix: String,
    /// Idle time after which a live sequence is torn down.
    pub sequence_timeout: chrono::Duration,
    /// Channel receiving kick and word-filter reports, if any.
    pub audit_log_channel_id: Option<u64>,
}

impl BotSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            sequence_timeout: chrono::Duration::minutes(config.sequence_timeout_minutes),
            audit_log_channel_id: config.audit_log_channel_id,
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            sequence_timeout: chrono::Duration::minutes(30),
            audit_log_channel_id: None,
        }
    }
}

#[derive(Clone)]
pub struct BotState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Outbound Discord operations.
    pub discord: Arc<dyn DiscordApi>,

    /// Live conversational sequences.
    pub sequences: SequenceRegistry,

    /// "Awaiting review" notices per user.
    pub notices: NoticeBoard,

    pub settings: BotSettings,
}

impl BotState {
    pub fn new(db: DatabaseConnection, discord: Arc<dyn DiscordApi>, settings: BotSettings) -> Self {
        Self {
            db,
            discord,
            sequences: SequenceRegistry::new(),
            notices: NoticeBoard::new(),
            settings,
        }
    }

    /// Formats a command with the configured prefix, e.g. `!join`.
    pub fn command(&self, alias: &str) -> String {
        format!("{}{}", self.settings.command_prefix, alias)
    }
}

#[cfg(test)]
impl BotState {
    /// Builds a state over a recording Discord mock, returning both.
    pub fn with_mock(
        db: DatabaseConnection,
    ) -> (Self, Arc<crate::discord::mock::MockDiscordApi>) {
        let mock = Arc::new(crate::discord::mock::MockDiscordApi::new());
        let state = Self::new(db, mock.clone(), BotSettings::default());
        (state, mock)
    }
}
