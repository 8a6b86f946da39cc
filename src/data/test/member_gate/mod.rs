use crate::{data::member_gate::GuildMemberGateRepository, model::member_gate::GuildGateConfig};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_by_guild_id;
mod get_all_with_timers;
mod upsert;
