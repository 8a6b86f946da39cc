//! Guild member gate factory for creating test configuration rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild gate configurations.
///
/// Every optional setting defaults to unset; override the ones a test needs.
///
/// # Example
///
/// ```rust,ignore
/// let gate = GuildMemberGateFactory::new(&db)
///     .guild_id("987654321")
///     .member_role_id(Some("55"))
///     .build()
///     .await?;
/// ```
pub struct GuildMemberGateFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    member_role_id: Option<String>,
    rules_channel_id: Option<String>,
    gate_channel_id: Option<String>,
    welcome_channel_id: Option<String>,
    remove_time_hours: Option<i64>,
    reminder_time_hours: Option<i64>,
}

impl<'a> GuildMemberGateFactory<'a> {
    /// Creates a new factory with a unique guild id and no settings.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            member_role_id: None,
            rules_channel_id: None,
            gate_channel_id: None,
            welcome_channel_id: None,
            remove_time_hours: None,
            reminder_time_hours: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn member_role_id(mut self, role_id: Option<&str>) -> Self {
        self.member_role_id = role_id.map(str::to_string);
        self
    }

    pub fn rules_channel_id(mut self, channel_id: Option<&str>) -> Self {
        self.rules_channel_id = channel_id.map(str::to_string);
        self
    }

    pub fn gate_channel_id(mut self, channel_id: Option<&str>) -> Self {
        self.gate_channel_id = channel_id.map(str::to_string);
        self
    }

    pub fn welcome_channel_id(mut self, channel_id: Option<&str>) -> Self {
        self.welcome_channel_id = channel_id.map(str::to_string);
        self
    }

    pub fn remove_time_hours(mut self, hours: Option<i64>) -> Self {
        self.remove_time_hours = hours;
        self
    }

    pub fn reminder_time_hours(mut self, hours: Option<i64>) -> Self {
        self.reminder_time_hours = hours;
        self
    }

    /// Builds and inserts the configuration row.
    ///
    /// # Returns
    /// - `Ok(entity::guild_member_gate::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_member_gate::Model, DbErr> {
        entity::guild_member_gate::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            member_role_id: ActiveValue::Set(self.member_role_id),
            rules_channel_id: ActiveValue::Set(self.rules_channel_id),
            gate_channel_id: ActiveValue::Set(self.gate_channel_id),
            welcome_channel_id: ActiveValue::Set(self.welcome_channel_id),
            remove_time_hours: ActiveValue::Set(self.remove_time_hours),
            reminder_time_hours: ActiveValue::Set(self.reminder_time_hours),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a gate configuration with a unique guild id and nothing set.
pub async fn create_guild_member_gate(
    db: &DatabaseConnection,
) -> Result<entity::guild_member_gate::Model, DbErr> {
    GuildMemberGateFactory::new(db).build().await
}
