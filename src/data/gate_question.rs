use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Candidate screening questions of a guild.
///
/// Questions form a set per guild; inserting a duplicate is a no-op.
pub struct GateQuestionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GateQuestionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all questions of a guild in insertion order.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<String>, DbErr> {
        use entity::guild_member_gate_question::Column;

        let rows = entity::prelude::GuildMemberGateQuestion::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.question).collect())
    }

    /// Adds a question to a guild's set.
    ///
    /// # Returns
    /// - `Ok(true)`: Question inserted
    /// - `Ok(false)`: Guild already had this exact question
    pub async fn create(&self, guild_id: u64, question: &str) -> Result<bool, DbErr> {
        if self.exists(guild_id, question).await? {
            return Ok(false);
        }

        entity::guild_member_gate_question::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            question: ActiveValue::Set(question.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes one question from a guild's set.
    ///
    /// # Returns
    /// - `Ok(true)`: Question removed
    /// - `Ok(false)`: No such question
    pub async fn delete(&self, guild_id: u64, question: &str) -> Result<bool, DbErr> {
        use entity::guild_member_gate_question::Column;

        let result = entity::prelude::GuildMemberGateQuestion::delete_many()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::Question.eq(question))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes every question of a guild, returning how many were removed.
    pub async fn delete_by_guild_id(&self, guild_id: u64) -> Result<u64, DbErr> {
        use entity::guild_member_gate_question::Column;

        let result = entity::prelude::GuildMemberGateQuestion::delete_many()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn exists(&self, guild_id: u64, question: &str) -> Result<bool, DbErr> {
        use entity::guild_member_gate_question::Column;

        let count = entity::prelude::GuildMemberGateQuestion::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::Question.eq(question))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
