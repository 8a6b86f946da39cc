use crate::{
    data::welcome_message::WelcomeMessageRepository,
    model::welcome_message::CreateWelcomeMessageParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
