use crate::{
    data::blacklisted_word::BlacklistedWordRepository,
    model::blacklisted_word::{CreateBlacklistedWordParam, FilterMethod},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_by_guild_id;
