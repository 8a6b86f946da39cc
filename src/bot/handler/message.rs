use serenity::all::{Context, Message, MessageUpdateEvent};

use crate::{
    command, model::event::IncomingMessage, sequence, service::word_filter::WordFilterService,
    state::BotState,
};

/// Handle message creation in a channel
pub async fn handle_message(state: &BotState, _ctx: Context, message: Message) {
    process_message(state, &IncomingMessage::from_message(&message)).await;
}

/// Handle an edited message; edits only go through the word filter
pub async fn handle_message_update(
    state: &BotState,
    _ctx: Context,
    _old_if_available: Option<Message>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    let message = match new {
        Some(new) => IncomingMessage::from_message(&new),
        None => match IncomingMessage::from_update(&event) {
            Some(message) => message,
            None => return,
        },
    };

    filter(state, &message).await;
}

/// Runs a created message through the word filter, live sequences and
/// command dispatch, in that order.
///
/// A filtered message is not processed any further.
pub async fn process_message(state: &BotState, message: &IncomingMessage) {
    if filter(state, message).await {
        return;
    }

    sequence::route_message(state, message).await;
    command::dispatch(state, message).await;
}

/// Returns whether the message was filtered.
async fn filter(state: &BotState, message: &IncomingMessage) -> bool {
    match WordFilterService::new(state).check_message(message).await {
        Ok(filtered) => filtered,
        Err(e) => {
            tracing::error!(
                "Failed to check message {} against the word filter: {}",
                message.message_id,
                e
            );
            false
        }
    }
}
