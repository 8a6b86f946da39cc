//! Platform events reduced to the fields the gate needs.
//!
//! Handlers convert serenity payloads into these plain structs before calling
//! into the orchestrator, which keeps flows and tests free of gateway types.

use chrono::{DateTime, Utc};
use serenity::all::{Member, Message, MessageUpdateEvent, Reaction, ReactionType};

/// A created or edited message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub message_id: u64,
    /// Absent for private channels.
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
    /// Users mentioned in the message, in order.
    pub mentioned_user_ids: Vec<u64>,
    /// Channels mentioned with `<#id>` in the message, in order.
    pub mentioned_channel_ids: Vec<u64>,
}

impl IncomingMessage {
    pub fn from_message(message: &Message) -> Self {
        Self {
            message_id: message.id.get(),
            guild_id: message.guild_id.map(|id| id.get()),
            channel_id: message.channel_id.get(),
            author_id: message.author.id.get(),
            author_name: message.author.name.clone(),
            author_is_bot: message.author.bot,
            content: message.content.clone(),
            mentioned_user_ids: message.mentions.iter().map(|u| u.id.get()).collect(),
            mentioned_channel_ids: channel_mentions(&message.content),
        }
    }

    /// Builds a message from an edit event.
    ///
    /// Returns `None` when the edit carries no author or no content, e.g. an
    /// embed-only update, since there is nothing to filter.
    pub fn from_update(event: &MessageUpdateEvent) -> Option<Self> {
        let author = event.author.as_ref()?;
        let content = event.content.clone()?;

        Some(Self {
            message_id: event.id.get(),
            guild_id: event.guild_id.map(|id| id.get()),
            channel_id: event.channel_id.get(),
            author_id: author.id.get(),
            author_name: author.name.clone(),
            author_is_bot: author.bot,
            mentioned_user_ids: event
                .mentions
                .as_ref()
                .map(|users| users.iter().map(|u| u.id.get()).collect())
                .unwrap_or_default(),
            mentioned_channel_ids: channel_mentions(&content),
            content,
        })
    }
}

/// Extracts every `<#id>` channel mention from message text.
pub fn channel_mentions(content: &str) -> Vec<u64> {
    content
        .split_whitespace()
        .filter_map(serenity::utils::parse_channel_mention)
        .map(|id| id.get())
        .collect()
}

/// A reaction added to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingReaction {
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub message_id: u64,
    pub user_id: u64,
    /// Unicode emoji; custom emoji are rendered as their name.
    pub emoji: String,
}

impl IncomingReaction {
    /// Returns `None` for reactions without a reacting user.
    pub fn from_reaction(reaction: &Reaction) -> Option<Self> {
        let user_id = reaction.user_id?.get();
        let emoji = match &reaction.emoji {
            ReactionType::Unicode(emoji) => emoji.clone(),
            ReactionType::Custom { name, .. } => name.clone().unwrap_or_default(),
            _ => String::new(),
        };

        Some(Self {
            guild_id: reaction.guild_id.map(|id| id.get()),
            channel_id: reaction.channel_id.get(),
            message_id: reaction.message_id.get(),
            user_id,
            emoji,
        })
    }
}

/// The parts of a guild member the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub guild_id: u64,
    pub user_id: u64,
    pub name: String,
    pub is_bot: bool,
    pub role_ids: Vec<u64>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl MemberSnapshot {
    pub fn from_member(member: &Member) -> Self {
        Self {
            guild_id: member.guild_id.get(),
            user_id: member.user.id.get(),
            name: member.user.name.clone(),
            is_bot: member.user.bot,
            role_ids: member.roles.iter().map(|r| r.get()).collect(),
            joined_at: member.joined_at.map(|t| t.to_utc()),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// Roles present on `self` but not on `old`.
    pub fn roles_added_since(&self, old: &MemberSnapshot) -> Vec<u64> {
        self.role_ids
            .iter()
            .copied()
            .filter(|role| !old.role_ids.contains(role))
            .collect()
    }
}
