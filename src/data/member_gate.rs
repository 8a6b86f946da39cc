use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::model::member_gate::GuildGateConfig;

pub struct GuildMemberGateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildMemberGateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the gate configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildGateConfig))`: Configuration row exists
    /// - `Ok(None)`: Guild never configured the gate
    /// - `Err(DbErr)`: Database error or malformed stored id
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildGateConfig>, DbErr> {
        entity::prelude::GuildMemberGate::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(GuildGateConfig::from_entity)
            .transpose()
    }

    /// Inserts or fully overwrites a guild's configuration row.
    pub async fn upsert(&self, config: &GuildGateConfig) -> Result<GuildGateConfig, DbErr> {
        use entity::guild_member_gate::Column;

        let model = entity::prelude::GuildMemberGate::insert(entity::guild_member_gate::ActiveModel {
            guild_id: ActiveValue::Set(config.guild_id.to_string()),
            member_role_id: ActiveValue::Set(config.member_role_id.map(|id| id.to_string())),
            rules_channel_id: ActiveValue::Set(config.rules_channel_id.map(|id| id.to_string())),
            gate_channel_id: ActiveValue::Set(config.gate_channel_id.map(|id| id.to_string())),
            welcome_channel_id: ActiveValue::Set(
                config.welcome_channel_id.map(|id| id.to_string()),
            ),
            remove_time_hours: ActiveValue::Set(hours_to_entity(config.remove_time_hours)?),
            reminder_time_hours: ActiveValue::Set(hours_to_entity(config.reminder_time_hours)?),
        })
        .on_conflict(
            OnConflict::column(Column::GuildId)
                .update_columns([
                    Column::MemberRoleId,
                    Column::RulesChannelId,
                    Column::GateChannelId,
                    Column::WelcomeChannelId,
                    Column::RemoveTimeHours,
                    Column::ReminderTimeHours,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildGateConfig::from_entity(model)
    }

    /// Deletes a guild's configuration row.
    ///
    /// # Returns
    /// - `Ok(true)`: A row was removed
    /// - `Ok(false)`: Guild had no row
    pub async fn delete(&self, guild_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::GuildMemberGate::delete_by_id(guild_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every configuration that has a purge or reminder timer set.
    ///
    /// Used by the hourly purge job. Rows missing a gate channel or member role
    /// are filtered out after conversion since the job cannot act on them.
    pub async fn get_all_with_timers(&self) -> Result<Vec<GuildGateConfig>, DbErr> {
        use entity::guild_member_gate::Column;

        let rows = entity::prelude::GuildMemberGate::find()
            .filter(
                Condition::any()
                    .add(Column::RemoveTimeHours.is_not_null())
                    .add(Column::ReminderTimeHours.is_not_null()),
            )
            .all(self.db)
            .await?;

        let configs = rows
            .into_iter()
            .map(GuildGateConfig::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(configs.into_iter().filter(|c| c.has_timers()).collect())
    }
}

fn hours_to_entity(hours: Option<u64>) -> Result<Option<i64>, DbErr> {
    hours
        .map(|h| i64::try_from(h).map_err(|_| DbErr::Custom(format!("Hour value {} too large", h))))
        .transpose()
}
