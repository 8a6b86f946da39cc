use std::time::Duration;

use crate::{
    data::PendingQuestionRepository,
    discord::{outbound, GatePermission},
    error::{gate::GateError, AppError},
    gate::MemberGate,
    model::event::IncomingMessage,
    sequence::{configure, question, review},
    service::member_gate::MemberGateService,
};

const ALREADY_ANSWERED_LIFETIME: Duration = Duration::from_secs(60);

pub const NO_QUESTIONS_REASON: &str = "Member gate has no questions configured.";

impl MemberGate<'_> {
    /// `!gateConfig`: opens the configuration menu for moderators.
    ///
    /// Silently ignored for members without Manage Roles.
    pub async fn configure(&self, message: &IncomingMessage) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };
        if !self.can_manage_roles(guild_id, message.author_id).await? {
            return Ok(());
        }

        configure::start(self.state, message.author_id, message.channel_id, guild_id).await
    }

    /// `!join`: starts the screening dialogue for a member.
    ///
    /// Does nothing when the guild has no member role, the author is not a
    /// member or already holds the role. Members with an answer awaiting
    /// review are asked to be patient; guilds without questions accept the
    /// member right away.
    pub async fn join(&self, message: &IncomingMessage) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };
        let config = self.config(guild_id).await?;
        let Some(role_id) = config.member_role_id else {
            return Ok(());
        };
        let Some(member) = self.state.discord.member(guild_id, message.author_id).await? else {
            return Ok(());
        };
        if member.has_role(role_id) {
            return Ok(());
        }

        if PendingQuestionRepository::new(&self.state.db)
            .exists(member.user_id)
            .await?
        {
            outbound::send_expiring(
                &self.state.discord,
                message.channel_id,
                "You have already tried answering a question. A moderator now needs to manually review you. Please be patient.",
                ALREADY_ANSWERED_LIFETIME,
            )
            .await;
            return Ok(());
        }

        match MemberGateService::new(&self.state.db)
            .random_question(guild_id)
            .await?
        {
            Some(question) => {
                question::start(
                    self.state,
                    member.user_id,
                    message.channel_id,
                    guild_id,
                    question,
                )
                .await
            }
            None => {
                tracing::info!(
                    "Accepting user {} in guild {} without questions",
                    member.user_id,
                    guild_id
                );
                self.state
                    .discord
                    .add_role(guild_id, member.user_id, role_id, NO_QUESTIONS_REASON)
                    .await
            }
        }
    }

    /// `!review <user id>`: opens a review of a user's stored answer.
    ///
    /// Silently ignored for members without Manage Roles.
    pub async fn review(&self, message: &IncomingMessage, arguments: &str) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };
        if !self.can_manage_roles(guild_id, message.author_id).await? {
            return Ok(());
        }

        let reviewed_user_id = parse_user_id(arguments, &self.state.command("review"))?;

        review::start(
            self.state,
            message.author_id,
            message.channel_id,
            guild_id,
            reviewed_user_id,
        )
        .await
    }

    async fn can_manage_roles(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        self.state
            .discord
            .has_permission(guild_id, user_id, GatePermission::ManageRoles)
            .await
    }
}

/// Parses a user id argument, accepting a raw id or a mention.
fn parse_user_id(arguments: &str, command: &str) -> Result<u64, GateError> {
    let raw = arguments
        .split_whitespace()
        .next()
        .ok_or_else(|| GateError::MissingArguments(format!("{} <user id>", command)))?;

    raw.trim_start_matches(['<', '@', '!'])
        .trim_end_matches('>')
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| GateError::InvalidUserId(raw.to_string()))
}
