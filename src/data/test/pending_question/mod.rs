use crate::{
    data::pending_question::PendingQuestionRepository,
    model::pending_question::CreatePendingQuestionParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_by_user_id;
mod find_by_user_id;
mod upsert;
mod user_ids_by_guild_id;
