//! Best-effort outbound helpers.
//!
//! Flows never fail because Discord rejected a send or delete. These wrappers
//! log the failure and carry on, returning `None` where an id was expected.

use std::{sync::Arc, time::Duration};

use crate::discord::{DiscordApi, OutgoingEmbed};

/// Sends a message, logging failures.
pub async fn send(api: &Arc<dyn DiscordApi>, channel_id: u64, content: &str) -> Option<u64> {
    match api.send_message(channel_id, content).await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::error!("Failed to send message to channel {}: {}", channel_id, e);
            None
        }
    }
}

/// Sends an embed, logging failures.
pub async fn send_embed(
    api: &Arc<dyn DiscordApi>,
    channel_id: u64,
    content: Option<&str>,
    embed: &OutgoingEmbed,
) -> Option<u64> {
    match api.send_embed(channel_id, content, embed).await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::error!("Failed to send embed to channel {}: {}", channel_id, e);
            None
        }
    }
}

/// Sends a message and deletes it again after `after` has elapsed.
///
/// The delete runs on a detached task so the caller is not held up.
pub async fn send_expiring(
    api: &Arc<dyn DiscordApi>,
    channel_id: u64,
    content: &str,
    after: Duration,
) -> Option<u64> {
    let message_id = send(api, channel_id, content).await?;
    delete_after(api, channel_id, message_id, after);
    Some(message_id)
}

/// Schedules deletion of an existing message.
pub fn delete_after(api: &Arc<dyn DiscordApi>, channel_id: u64, message_id: u64, after: Duration) {
    let api = Arc::clone(api);
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        delete(&api, channel_id, message_id).await;
    });
}

/// Deletes a message, logging failures.
pub async fn delete(api: &Arc<dyn DiscordApi>, channel_id: u64, message_id: u64) {
    if let Err(e) = api.delete_message(channel_id, message_id).await {
        tracing::warn!(
            "Failed to delete message {} in channel {}: {}",
            message_id,
            channel_id,
            e
        );
    }
}

/// Deletes many messages of one channel, logging failures.
pub async fn delete_many(api: &Arc<dyn DiscordApi>, channel_id: u64, message_ids: &[u64]) {
    if message_ids.is_empty() {
        return;
    }

    if let Err(e) = api.delete_messages(channel_id, message_ids).await {
        tracing::warn!(
            "Failed to delete {} messages in channel {}: {}",
            message_ids.len(),
            channel_id,
            e
        );
    }
}

/// Adds a reaction, logging failures.
pub async fn react(api: &Arc<dyn DiscordApi>, channel_id: u64, message_id: u64, emoji: &str) {
    if let Err(e) = api.add_reaction(channel_id, message_id, emoji).await {
        tracing::warn!("Failed to react to message {}: {}", message_id, e);
    }
}
