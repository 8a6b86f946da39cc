use crate::data::gate_question::GateQuestionRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_by_guild_id;
