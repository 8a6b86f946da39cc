use std::collections::HashSet;

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::{
    parse_snowflake,
    pending_question::{CreatePendingQuestionParam, PendingQuestion},
};

/// Answers awaiting manual review, one row per user.
pub struct PendingQuestionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PendingQuestionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a user's answer, replacing any previous answer of that user.
    pub async fn upsert(&self, param: CreatePendingQuestionParam) -> Result<PendingQuestion, DbErr> {
        use entity::member_gate_question::Column;

        let model = entity::prelude::MemberGateQuestion::insert(
            entity::member_gate_question::ActiveModel {
                user_id: ActiveValue::Set(param.user_id.to_string()),
                guild_id: ActiveValue::Set(param.guild_id.to_string()),
                question: ActiveValue::Set(param.question),
                answer: ActiveValue::Set(param.answer),
                created_at: ActiveValue::Set(Utc::now()),
            },
        )
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([
                    Column::GuildId,
                    Column::Question,
                    Column::Answer,
                    Column::CreatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        PendingQuestion::from_entity(model)
    }

    /// Finds the stored answer of a user.
    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<PendingQuestion>, DbErr> {
        entity::prelude::MemberGateQuestion::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(PendingQuestion::from_entity)
            .transpose()
    }

    pub async fn exists(&self, user_id: u64) -> Result<bool, DbErr> {
        Ok(entity::prelude::MemberGateQuestion::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .is_some())
    }

    /// Deletes a user's stored answer.
    ///
    /// The delete doubles as the claim when several moderators act on the
    /// same answer: only the caller that gets `true` removed the row.
    ///
    /// # Returns
    /// - `Ok(true)`: Row removed by this call
    /// - `Ok(false)`: Row was already gone
    pub async fn delete_by_user_id(&self, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::MemberGateQuestion::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the ids of every user in a guild with a stored answer.
    pub async fn user_ids_by_guild_id(&self, guild_id: u64) -> Result<HashSet<u64>, DbErr> {
        use entity::member_gate_question::Column;

        let rows = entity::prelude::MemberGateQuestion::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        rows.iter()
            .map(|row| parse_snowflake("user_id", &row.user_id))
            .collect()
    }
}
