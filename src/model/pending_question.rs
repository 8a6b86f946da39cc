use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::parse_snowflake;

/// Stored answer of a user waiting for manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    /// User who answered; there is at most one row per user.
    pub user_id: u64,
    /// Guild the question was asked in.
    pub guild_id: u64,
    /// Question the user was asked.
    pub question: String,
    /// Answer exactly as the user typed it.
    pub answer: String,
    /// When the answer was stored.
    pub created_at: DateTime<Utc>,
}

impl PendingQuestion {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::member_gate_question::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_snowflake("user_id", &entity.user_id)?,
            guild_id: parse_snowflake("guild_id", &entity.guild_id)?,
            question: entity.question,
            answer: entity.answer,
            created_at: entity.created_at,
        })
    }

    /// A row whose question and answer were both wiped.
    ///
    /// Such a row cannot be reviewed meaningfully.
    pub fn is_blank(&self) -> bool {
        self.question.trim().is_empty() && self.answer.trim().is_empty()
    }
}

/// Parameters for storing a user's answer.
#[derive(Debug, Clone)]
pub struct CreatePendingQuestionParam {
    pub user_id: u64,
    pub guild_id: u64,
    pub question: String,
    pub answer: String,
}
