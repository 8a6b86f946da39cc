//! Factory for answers awaiting manual review.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for pending review rows.
///
/// # Example
///
/// ```rust,ignore
/// let pending = MemberGateQuestionFactory::new(&db, "1001", "42")
///     .question("What is rule 3?")
///     .answer("Be nice")
///     .build()
///     .await?;
/// ```
pub struct MemberGateQuestionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    guild_id: String,
    question: String,
    answer: String,
}

impl<'a> MemberGateQuestionFactory<'a> {
    /// Creates a new factory for the given user and guild.
    ///
    /// Defaults:
    /// - question: `"What is the first rule?"`
    /// - answer: `"Be respectful"`
    pub fn new(db: &'a DatabaseConnection, user_id: &str, guild_id: &str) -> Self {
        Self {
            db,
            user_id: user_id.to_string(),
            guild_id: guild_id.to_string(),
            question: "What is the first rule?".to_string(),
            answer: "Be respectful".to_string(),
        }
    }

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }

    /// Builds and inserts the pending review row.
    pub async fn build(self) -> Result<entity::member_gate_question::Model, DbErr> {
        entity::member_gate_question::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            guild_id: ActiveValue::Set(self.guild_id),
            question: ActiveValue::Set(self.question),
            answer: ActiveValue::Set(self.answer),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending review row with the default question and answer.
pub async fn create_pending_question(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
) -> Result<entity::member_gate_question::Model, DbErr> {
    MemberGateQuestionFactory::new(db, user_id, guild_id)
        .build()
        .await
}
