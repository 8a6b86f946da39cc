use std::sync::Arc;

use crate::{
    discord::{mention_channel, mention_user, outbound, DiscordApi, OutgoingEmbed},
    state::BotState,
};

/// Reports moderation actions to the configured audit log channel.
///
/// Every method is a no-op when no audit log channel is configured.
pub struct AuditLogService<'a> {
    discord: &'a Arc<dyn DiscordApi>,
    channel_id: Option<u64>,
}

impl<'a> AuditLogService<'a> {
    pub fn new(state: &'a BotState) -> Self {
        Self {
            discord: &state.discord,
            channel_id: state.settings.audit_log_channel_id,
        }
    }

    /// Reports that the bot kicked a member.
    pub async fn report_kick(&self, guild_id: u64, user_id: u64, reason: &str) {
        let Some(channel_id) = self.channel_id else {
            return;
        };

        let embed = OutgoingEmbed {
            title: Some("Member kicked".to_string()),
            fields: vec![
                ("User".to_string(), mention_user(user_id), true),
                ("User id".to_string(), user_id.to_string(), true),
                ("Guild id".to_string(), guild_id.to_string(), true),
                ("Reason".to_string(), reason.to_string(), false),
            ],
            ..Default::default()
        };
        outbound::send_embed(self.discord, channel_id, None, &embed).await;
    }

    /// Reports a message removed by the word filter.
    pub async fn report_filtered_message(&self, user_id: u64, channel_id: u64, content: &str) {
        let Some(log_channel_id) = self.channel_id else {
            return;
        };

        let embed = OutgoingEmbed {
            title: Some("Message filtered".to_string()),
            description: Some(content.chars().take(1024).collect()),
            fields: vec![
                ("Author".to_string(), mention_user(user_id), true),
                ("Channel".to_string(), mention_channel(channel_id), true),
                ("Reason".to_string(), "Contained banned word(s)".to_string(), false),
            ],
            ..Default::default()
        };
        outbound::send_embed(self.discord, log_channel_id, None, &embed).await;
    }
}
