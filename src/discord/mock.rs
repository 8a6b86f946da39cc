//! Recording [`DiscordApi`] used by flow and orchestrator tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use chrono::Utc;
use serenity::async_trait;

use crate::{
    discord::{DiscordApi, FetchedMessage, GatePermission, OutgoingEmbed},
    error::AppError,
    model::event::MemberSnapshot,
};

/// Outbound action recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send {
        channel_id: u64,
        message_id: u64,
        content: String,
    },
    SendEmbed {
        channel_id: u64,
        message_id: u64,
        content: Option<String>,
        embed: OutgoingEmbed,
    },
    Delete {
        channel_id: u64,
        message_id: u64,
    },
    BulkDelete {
        channel_id: u64,
        message_ids: Vec<u64>,
    },
    React {
        channel_id: u64,
        message_id: u64,
        emoji: String,
    },
    AddRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    Kick {
        guild_id: u64,
        user_id: u64,
        reason: String,
    },
}

pub struct MockDiscordApi {
    bot_user_id: u64,
    next_message_id: AtomicU64,
    actions: Mutex<Vec<Action>>,
    members: Mutex<HashMap<(u64, u64), MemberSnapshot>>,
    permissions: Mutex<HashSet<(u64, u64, GatePermission)>>,
    roles: Mutex<HashMap<u64, Vec<(u64, String)>>>,
    history: Mutex<HashMap<u64, Vec<FetchedMessage>>>,
}

impl MockDiscordApi {
    pub const BOT_USER_ID: u64 = 999;

    pub fn new() -> Self {
        Self {
            bot_user_id: Self::BOT_USER_ID,
            next_message_id: AtomicU64::new(50_000),
            actions: Mutex::new(Vec::new()),
            members: Mutex::new(HashMap::new()),
            permissions: Mutex::new(HashSet::new()),
            roles: Mutex::new(HashMap::new()),
            history: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a guild member with the given roles.
    pub fn add_member(&self, guild_id: u64, user_id: u64, role_ids: &[u64]) {
        self.members.lock().unwrap().insert(
            (guild_id, user_id),
            MemberSnapshot {
                guild_id,
                user_id,
                name: format!("user{}", user_id),
                is_bot: false,
                role_ids: role_ids.to_vec(),
                joined_at: Some(Utc::now()),
            },
        );
    }

    pub fn grant(&self, guild_id: u64, user_id: u64, permission: GatePermission) {
        self.permissions
            .lock()
            .unwrap()
            .insert((guild_id, user_id, permission));
    }

    pub fn add_role_definition(&self, guild_id: u64, role_id: u64, name: &str) {
        self.roles
            .lock()
            .unwrap()
            .entry(guild_id)
            .or_default()
            .push((role_id, name.to_string()));
    }

    /// Puts a message written by someone else into a channel's history.
    pub fn add_history(&self, channel_id: u64, message_id: u64, author_id: u64, content: &str) {
        self.history
            .lock()
            .unwrap()
            .entry(channel_id)
            .or_default()
            .push(FetchedMessage {
                id: message_id,
                channel_id,
                author_id,
                content: content.to_string(),
                mentioned_user_ids: Vec::new(),
                created_at: Utc::now(),
            });
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Text content of every plain and embed message, in send order.
    pub fn sent_contents(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Send { content, .. } => Some(content),
                Action::SendEmbed { content, .. } => content,
                _ => None,
            })
            .collect()
    }

    /// Plain messages sent to one channel.
    pub fn sent_to(&self, channel_id: u64) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Send {
                    channel_id: c,
                    content,
                    ..
                } if c == channel_id => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Embeds sent to any channel.
    pub fn embeds(&self) -> Vec<OutgoingEmbed> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::SendEmbed { embed, .. } => Some(embed),
                _ => None,
            })
            .collect()
    }

    /// Every message id deleted individually or in bulk.
    pub fn deleted(&self) -> Vec<u64> {
        self.actions()
            .into_iter()
            .flat_map(|action| match action {
                Action::Delete { message_id, .. } => vec![message_id],
                Action::BulkDelete { message_ids, .. } => message_ids,
                _ => Vec::new(),
            })
            .collect()
    }

    pub fn reactions_on(&self, message_id: u64) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::React {
                    message_id: m,
                    emoji,
                    ..
                } if m == message_id => Some(emoji),
                _ => None,
            })
            .collect()
    }

    pub fn roles_added(&self) -> Vec<(u64, u64, u64)> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::AddRole {
                    guild_id,
                    user_id,
                    role_id,
                } => Some((guild_id, user_id, role_id)),
                _ => None,
            })
            .collect()
    }

    pub fn kicks(&self) -> Vec<(u64, u64, String)> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Kick {
                    guild_id,
                    user_id,
                    reason,
                } => Some((guild_id, user_id, reason)),
                _ => None,
            })
            .collect()
    }

    /// Id of the most recently sent message whose text contains `needle`.
    pub fn message_containing(&self, needle: &str) -> Option<u64> {
        self.actions()
            .into_iter()
            .rev()
            .find_map(|action| match action {
                Action::Send {
                    message_id,
                    content,
                    ..
                } if content.contains(needle) => Some(message_id),
                _ => None,
            })
    }

    pub fn clear_actions(&self) {
        self.actions.lock().unwrap().clear();
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    fn remember_sent(&self, channel_id: u64, message_id: u64, content: &str) {
        let mentioned_user_ids = mentioned_users(content);
        self.history
            .lock()
            .unwrap()
            .entry(channel_id)
            .or_default()
            .push(FetchedMessage {
                id: message_id,
                channel_id,
                author_id: self.bot_user_id,
                content: content.to_string(),
                mentioned_user_ids,
                created_at: Utc::now(),
            });
    }
}

impl Default for MockDiscordApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts `<@id>` mentions the way Discord would resolve them.
fn mentioned_users(content: &str) -> Vec<u64> {
    content
        .split_whitespace()
        .filter_map(|token| {
            token
                .trim_end_matches(|c: char| !c.is_ascii_digit() && c != '>')
                .strip_prefix("<@")
                .and_then(|rest| rest.strip_suffix('>'))
                .and_then(|id| id.trim_start_matches('!').parse::<u64>().ok())
        })
        .collect()
}

#[async_trait]
impl DiscordApi for MockDiscordApi {
    fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.remember_sent(channel_id, message_id, content);
        self.record(Action::Send {
            channel_id,
            message_id,
            content: content.to_string(),
        });
        Ok(message_id)
    }

    async fn send_embed(
        &self,
        channel_id: u64,
        content: Option<&str>,
        embed: &OutgoingEmbed,
    ) -> Result<u64, AppError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.record(Action::SendEmbed {
            channel_id,
            message_id,
            content: content.map(str::to_string),
            embed: embed.clone(),
        });
        Ok(message_id)
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        self.record(Action::Delete {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn delete_messages(&self, channel_id: u64, message_ids: &[u64]) -> Result<(), AppError> {
        self.record(Action::BulkDelete {
            channel_id,
            message_ids: message_ids.to_vec(),
        });
        Ok(())
    }

    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.record(Action::React {
            channel_id,
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn get_message(&self, channel_id: u64, message_id: u64) -> Result<FetchedMessage, AppError> {
        self.history
            .lock()
            .unwrap()
            .get(&channel_id)
            .and_then(|messages| messages.iter().find(|m| m.id == message_id).cloned())
            .ok_or_else(|| AppError::InternalError(format!("Unknown message {}", message_id)))
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: usize,
    ) -> Result<Vec<FetchedMessage>, AppError> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(&channel_id)
            .map(|messages| messages.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn member(&self, guild_id: u64, user_id: u64) -> Result<Option<MemberSnapshot>, AppError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .get(&(guild_id, user_id))
            .cloned())
    }

    async fn members(&self, guild_id: u64) -> Result<Vec<MemberSnapshot>, AppError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.guild_id == guild_id)
            .cloned()
            .collect())
    }

    async fn has_permission(
        &self,
        guild_id: u64,
        user_id: u64,
        permission: GatePermission,
    ) -> Result<bool, AppError> {
        Ok(self
            .permissions
            .lock()
            .unwrap()
            .contains(&(guild_id, user_id, permission)))
    }

    async fn roles_by_name(&self, guild_id: u64, name: &str) -> Result<Vec<u64>, AppError> {
        let wanted = name.to_lowercase();
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&guild_id)
            .map(|roles| {
                roles
                    .iter()
                    .filter(|(_, role_name)| role_name.to_lowercase() == wanted)
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        if let Some(member) = self.members.lock().unwrap().get_mut(&(guild_id, user_id)) {
            member.role_ids.push(role_id);
        }
        self.record(Action::AddRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.members.lock().unwrap().remove(&(guild_id, user_id));
        self.record(Action::Kick {
            guild_id,
            user_id,
            reason: reason.to_string(),
        });
        Ok(())
    }
}
