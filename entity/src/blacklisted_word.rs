use sea_orm::entity::prelude::*;

/// Word filtered from guild messages.
///
/// `filter_method` holds one of `EXACT`, `CONTAINS`, `STARTS_WITH` or `ENDS_WITH`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "blacklisted_word")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub word: String,
    pub filter_method: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
