use sea_orm::DbErr;

use crate::model::{parse_optional_snowflake, parse_snowflake};

/// Per-guild member gate configuration.
///
/// A guild without a stored row behaves exactly like [`GuildGateConfig::new`],
/// which has every field unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuildGateConfig {
    /// Discord guild ID.
    pub guild_id: u64,
    /// Role granted once a user passes the gate.
    pub member_role_id: Option<u64>,
    /// Channel holding the server rules.
    pub rules_channel_id: Option<u64>,
    /// Channel where new users answer their question.
    pub gate_channel_id: Option<u64>,
    /// Channel receiving welcome messages.
    pub welcome_channel_id: Option<u64>,
    /// Hours after joining before an unverified user is kicked.
    pub remove_time_hours: Option<u64>,
    /// Hours after joining before an unverified user is reminded.
    pub reminder_time_hours: Option<u64>,
}

impl GuildGateConfig {
    /// Creates an empty configuration for a guild.
    pub fn new(guild_id: u64) -> Self {
        Self {
            guild_id,
            ..Default::default()
        }
    }

    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildGateConfig)` - Successfully converted config
    /// - `Err(DbErr::Custom)` - A stored id or timer is malformed
    pub fn from_entity(entity: entity::guild_member_gate::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake("guild_id", &entity.guild_id)?,
            member_role_id: parse_optional_snowflake("member_role_id", entity.member_role_id)?,
            rules_channel_id: parse_optional_snowflake("rules_channel_id", entity.rules_channel_id)?,
            gate_channel_id: parse_optional_snowflake("gate_channel_id", entity.gate_channel_id)?,
            welcome_channel_id: parse_optional_snowflake(
                "welcome_channel_id",
                entity.welcome_channel_id,
            )?,
            remove_time_hours: hours_from_entity("remove_time_hours", entity.remove_time_hours)?,
            reminder_time_hours: hours_from_entity(
                "reminder_time_hours",
                entity.reminder_time_hours,
            )?,
        })
    }

    /// Whether the scheduler has anything to do for this guild.
    pub fn has_timers(&self) -> bool {
        self.gate_channel_id.is_some()
            && self.member_role_id.is_some()
            && (self.remove_time_hours.is_some() || self.reminder_time_hours.is_some())
    }

    /// Clears the approval gate part of the configuration.
    pub fn clear_gate(&mut self) {
        self.member_role_id = None;
        self.gate_channel_id = None;
        self.rules_channel_id = None;
    }
}

fn hours_from_entity(field: &str, value: Option<i64>) -> Result<Option<u64>, DbErr> {
    value
        .map(|hours| {
            u64::try_from(hours)
                .map_err(|_| DbErr::Custom(format!("Negative value stored in {}", field)))
        })
        .transpose()
}

/// Channel slots that the configure flow can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChannel {
    Welcome,
    Gate,
    Rules,
}

/// Timers that the configure flow can set or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTimer {
    Purge,
    Reminder,
}
