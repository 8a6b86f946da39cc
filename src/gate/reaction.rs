use std::time::Duration;

use crate::{
    discord::{GatePermission, REVIEW_REQUEST_EMOJI},
    error::AppError,
    gate::MemberGate,
    model::event::IncomingReaction,
    sequence::{self, review},
};

/// Upper bound for reading back the reacted message.
const MESSAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

impl MemberGate<'_> {
    /// Handles a reaction: live sessions first, then the review bridge.
    pub async fn on_reaction(&self, reaction: &IncomingReaction) -> Result<(), AppError> {
        if reaction.user_id == self.state.discord.bot_user_id() {
            return Ok(());
        }
        if sequence::route_reaction(self.state, reaction).await {
            return Ok(());
        }

        if let Err(e) = self.review_from_notice(reaction).await {
            self.report(reaction.channel_id, &e).await;
        }

        Ok(())
    }

    /// Opens a review when a moderator taps ❔ on a notice in the gate channel.
    ///
    /// The notice must be the bot's own message, carry the review command and
    /// mention exactly one user; that user is reviewed.
    async fn review_from_notice(&self, reaction: &IncomingReaction) -> Result<(), AppError> {
        let Some(guild_id) = reaction.guild_id else {
            return Ok(());
        };
        if reaction.emoji != REVIEW_REQUEST_EMOJI {
            return Ok(());
        }

        let config = self.config(guild_id).await?;
        if config.gate_channel_id != Some(reaction.channel_id) {
            return Ok(());
        }
        if !self
            .state
            .discord
            .has_permission(guild_id, reaction.user_id, GatePermission::ManageRoles)
            .await?
        {
            return Ok(());
        }

        let message = tokio::time::timeout(
            MESSAGE_FETCH_TIMEOUT,
            self.state
                .discord
                .get_message(reaction.channel_id, reaction.message_id),
        )
        .await
        .map_err(|_| {
            AppError::InternalError(format!(
                "Timed out reading message {} for a review request",
                reaction.message_id
            ))
        })??;

        if message.author_id != self.state.discord.bot_user_id()
            || !message.content.contains(&self.state.command("review"))
            || message.mentioned_user_ids.len() != 1
        {
            return Ok(());
        }
        let Some(reviewed_user_id) = mentioned_user_id(&message.content) else {
            return Ok(());
        };

        review::start(
            self.state,
            reaction.user_id,
            reaction.channel_id,
            guild_id,
            reviewed_user_id,
        )
        .await
    }
}

/// Parses the user mention a notice starts with.
fn mentioned_user_id(content: &str) -> Option<u64> {
    content
        .split(' ')
        .next()?
        .trim_start_matches(['<', '@', '!'])
        .trim_end_matches('>')
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
}
