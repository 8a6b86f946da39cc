use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::blacklisted_word::{BlacklistedWord, CreateBlacklistedWordParam};

pub struct BlacklistedWordRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlacklistedWordRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<BlacklistedWord>, DbErr> {
        entity::prelude::BlacklistedWord::find()
            .filter(entity::blacklisted_word::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?
            .into_iter()
            .map(BlacklistedWord::from_entity)
            .collect()
    }

    pub async fn create(&self, param: CreateBlacklistedWordParam) -> Result<BlacklistedWord, DbErr> {
        let model = entity::blacklisted_word::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            word: ActiveValue::Set(param.word),
            filter_method: ActiveValue::Set(param.method.as_str().to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        BlacklistedWord::from_entity(model)
    }
}
