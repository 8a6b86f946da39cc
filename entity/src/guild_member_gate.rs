use sea_orm::entity::prelude::*;

/// Per-guild member gate settings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "guild_member_gate")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub member_role_id: Option<String>,
    pub rules_channel_id: Option<String>,
    pub gate_channel_id: Option<String>,
    pub welcome_channel_id: Option<String>,
    pub remove_time_hours: Option<i64>,
    pub reminder_time_hours: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
