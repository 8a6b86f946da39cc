use crate::{
    data::PendingQuestionRepository,
    discord::{mock::MockDiscordApi, GatePermission},
    error::AppError,
    gate::MemberGate,
    model::event::{IncomingMessage, IncomingReaction, MemberSnapshot},
    sequence::{notice::NoticeRef, SequenceKind},
    state::BotState,
};
use test_utils::{builder::TestBuilder, factory};


const GUILD_ID: u64 = 1;
const CHANNEL_ID: u64 = 10;
const GATE_CHANNEL_ID: u64 = 11;
const WELCOME_CHANNEL_ID: u64 = 12;
const RULES_CHANNEL_ID: u64 = 13;
const MEMBER_ROLE_ID: u64 = 300;
const MEMBER_ID: u64 = 20;
const MODERATOR_ID: u64 = 100;

fn member(user_id: u64, role_ids: &[u64]) -> MemberSnapshot {
    MemberSnapshot {
        guild_id: GUILD_ID,
        user_id,
        name: format!("user{}", user_id),
        is_bot: false,
        role_ids: role_ids.to_vec(),
        joined_at: None,
    }
}

fn command_message(author_id: u64, channel_id: u64, content: &str) -> IncomingMessage {
    IncomingMessage {
        message_id: 7_000,
        guild_id: Some(GUILD_ID),
        channel_id,
        author_id,
        author_name: format!("user{}", author_id),
        author_is_bot: false,
        content: content.to_string(),
        mentioned_user_ids: Vec::new(),
        mentioned_channel_ids: Vec::new(),
    }
}

/// Fully configured gate: member role, gate, rules and welcome channels.
async fn create_gate(db: &sea_orm::DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id(GUILD_ID.to_string())
        .member_role_id(Some(MEMBER_ROLE_ID.to_string().as_str()))
        .gate_channel_id(Some(GATE_CHANNEL_ID.to_string().as_str()))
        .rules_channel_id(Some(RULES_CHANNEL_ID.to_string().as_str()))
        .welcome_channel_id(Some(WELCOME_CHANNEL_ID.to_string().as_str()))
        .build()
        .await?;

    Ok(())
}
