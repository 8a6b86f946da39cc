use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::welcome_message::{CreateWelcomeMessageParam, WelcomeMessage};

pub struct WelcomeMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all welcome messages of a guild ordered by id.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<WelcomeMessage>, DbErr> {
        use entity::welcome_message::Column;

        entity::prelude::WelcomeMessage::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(WelcomeMessage::from_entity)
            .collect()
    }

    pub async fn create(&self, param: CreateWelcomeMessageParam) -> Result<WelcomeMessage, DbErr> {
        let model = entity::welcome_message::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            image_url: ActiveValue::Set(param.image_url),
            message: ActiveValue::Set(param.message),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        WelcomeMessage::from_entity(model)
    }

    /// Deletes a welcome message by id.
    ///
    /// # Returns
    /// - `Ok(true)`: Message removed
    /// - `Ok(false)`: No message with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::WelcomeMessage::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every welcome message of a guild, returning how many were removed.
    pub async fn delete_by_guild_id(&self, guild_id: u64) -> Result<u64, DbErr> {
        use entity::welcome_message::Column;

        let result = entity::prelude::WelcomeMessage::delete_many()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
