use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    data::{PendingQuestionRepository, WelcomeMessageRepository},
    discord::mock::MockDiscordApi,
    error::AppError,
    model::event::{IncomingMessage, IncomingReaction},
    sequence::{self, configure, question, registry::SequenceRegistry, review, SequenceKind},
    state::BotState,
};
use test_utils::{builder::TestBuilder, factory};

mod review_flow;

const GUILD_ID: u64 = 1;
const CHANNEL_ID: u64 = 10;
const GATE_CHANNEL_ID: u64 = 11;
const MEMBER_ROLE_ID: u64 = 300;
const MEMBER_ID: u64 = 20;
const MODERATOR_ID: u64 = 100;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1_000);

/// Message typed by a user in a guild channel.
fn message(author_id: u64, channel_id: u64, content: &str) -> IncomingMessage {
    IncomingMessage {
        message_id: NEXT_MESSAGE_ID.fetch_add(1, Ordering::SeqCst),
        guild_id: Some(GUILD_ID),
        channel_id,
        author_id,
        author_name: format!("user{}", author_id),
        author_is_bot: false,
        content: content.to_string(),
        mentioned_user_ids: Vec::new(),
        mentioned_channel_ids: crate::model::event::channel_mentions(content),
    }
}

fn reaction(user_id: u64, channel_id: u64, message_id: u64, emoji: &str) -> IncomingReaction {
    IncomingReaction {
        guild_id: Some(GUILD_ID),
        channel_id,
        message_id,
        user_id,
        emoji: emoji.to_string(),
    }
}

/// Sends each text as the user and routes it to their sessions.
async fn say(state: &BotState, author_id: u64, channel_id: u64, texts: &[&str]) {
    for text in texts {
        sequence::route_message(state, &message(author_id, channel_id, text)).await;
    }
}

/// Gate row for the test guild with a member role and gate channel.
async fn create_gate(db: &sea_orm::DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id(GUILD_ID.to_string())
        .member_role_id(Some(MEMBER_ROLE_ID.to_string().as_str()))
        .gate_channel_id(Some(GATE_CHANNEL_ID.to_string().as_str()))
        .build()
        .await?;

    Ok(())
}
