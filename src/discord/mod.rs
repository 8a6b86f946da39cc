//! Outbound Discord operations used by the gate.
//!
//! Everything the bot does to Discord goes through the [`DiscordApi`] trait so
//! flows and the orchestrator can be exercised against a recording mock. The
//! production implementation lives in [`client`] and wraps the bot's shared
//! serenity `Arc<Http>` client.

pub mod client;
pub mod outbound;

#[cfg(test)]
pub mod mock;

use chrono::{DateTime, Utc};
use serenity::async_trait;

use crate::{error::AppError, model::event::MemberSnapshot};

/// Reaction a user places to ask for a review of their stored answer.
pub const REVIEW_REQUEST_EMOJI: &str = "❔";
/// Review reaction meaning "approve".
pub const APPROVE_EMOJI: &str = "✅";
/// Review reaction meaning "reject and ask again".
pub const REJECT_EMOJI: &str = "❌";
/// Review reaction meaning "reject, a moderator handles it manually".
pub const NOOP_EMOJI: &str = "❓";

/// Maximum length of a single Discord message.
pub const MESSAGE_LIMIT: usize = 2000;

/// Guild permissions the gate checks before acting on a moderator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatePermission {
    ManageRoles,
    ManageMessages,
}

impl GatePermission {
    /// Human-readable name used in the help listing.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ManageRoles => "Manage Roles",
            Self::ManageMessages => "Manage Messages",
        }
    }
}

/// A message read back from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMessage {
    pub id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub mentioned_user_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

/// Embed content independent of serenity's builder types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// `(name, value, inline)` triples.
    pub fields: Vec<(String, String, bool)>,
}

/// Outbound Discord operations.
///
/// Ids are raw snowflakes. Implementations must be cheap to share across the
/// tasks serenity spawns per event, hence `Send + Sync` and usage through
/// `Arc<dyn DiscordApi>`.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Id of the bot's own user.
    fn bot_user_id(&self) -> u64;

    /// Sends a plain text message, returning its id.
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError>;

    /// Sends an embed with optional text content, returning the message id.
    async fn send_embed(
        &self,
        channel_id: u64,
        content: Option<&str>,
        embed: &OutgoingEmbed,
    ) -> Result<u64, AppError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Deletes many messages of one channel.
    ///
    /// Implementations chunk the ids by 100 and delete messages older than
    /// 14 days one by one, since bulk deletion rejects them.
    async fn delete_messages(&self, channel_id: u64, message_ids: &[u64]) -> Result<(), AppError>;

    async fn add_reaction(&self, channel_id: u64, message_id: u64, emoji: &str)
        -> Result<(), AppError>;

    async fn get_message(&self, channel_id: u64, message_id: u64) -> Result<FetchedMessage, AppError>;

    /// Reads up to `limit` of the most recent messages of a channel, newest first.
    async fn recent_messages(&self, channel_id: u64, limit: usize)
        -> Result<Vec<FetchedMessage>, AppError>;

    /// Fetches a guild member, `None` when the user is not in the guild.
    async fn member(&self, guild_id: u64, user_id: u64) -> Result<Option<MemberSnapshot>, AppError>;

    /// Lists every member of a guild.
    async fn members(&self, guild_id: u64) -> Result<Vec<MemberSnapshot>, AppError>;

    /// Whether a member holds a permission through ownership, roles or administrator.
    async fn has_permission(
        &self,
        guild_id: u64,
        user_id: u64,
        permission: GatePermission,
    ) -> Result<bool, AppError>;

    /// Ids of guild roles whose name equals `name`, ignoring case.
    async fn roles_by_name(&self, guild_id: u64, name: &str) -> Result<Vec<u64>, AppError>;

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError>;
}

/// Formats a user mention.
pub fn mention_user(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// Formats a channel mention.
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Splits text into chunks that fit in a single message.
///
/// Splits on line boundaries where possible. A single line longer than the
/// limit is cut at character boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if current.chars().count() + line.chars().count() > limit && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }

        if line.chars().count() > limit {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(limit) {
                let chunk: String = chunk.iter().collect();
                if chunk.chars().count() == limit {
                    parts.push(chunk);
                } else {
                    current = chunk;
                }
            }
        } else {
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
