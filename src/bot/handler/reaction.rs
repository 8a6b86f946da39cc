use serenity::all::{Context, Reaction};

use crate::{gate::MemberGate, model::event::IncomingReaction, state::BotState};

/// Handles a reaction added to a message
pub async fn handle_reaction_add(state: &BotState, _ctx: Context, reaction: Reaction) {
    let Some(reaction) = IncomingReaction::from_reaction(&reaction) else {
        return;
    };

    if let Err(e) = MemberGate::new(state).on_reaction(&reaction).await {
        tracing::error!(
            "Failed to handle reaction {} by user {} on message {}: {}",
            reaction.emoji,
            reaction.user_id,
            reaction.message_id,
            e
        );
    }
}
