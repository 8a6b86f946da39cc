use std::time::Duration;

use crate::{
    data::PendingQuestionRepository,
    discord::{mention_channel, mention_user, outbound, REVIEW_REQUEST_EMOJI},
    error::AppError,
    gate::MemberGate,
    model::event::MemberSnapshot,
    sequence::{self, notice::NoticeRef, SequenceKind},
    service::welcome_message::WelcomeMessageService,
};

const GREETING_LIFETIME: Duration = Duration::from_secs(5 * 60);

impl MemberGate<'_> {
    /// Greets a member who joined the guild.
    ///
    /// With a gate channel configured the member is pointed at `!join`, or,
    /// when they already left an answer on an earlier visit, moderators are
    /// offered that answer for review. Guilds without a gate channel get a
    /// plain welcome message instead.
    pub async fn on_member_join(&self, member: &MemberSnapshot) -> Result<(), AppError> {
        if member.is_bot {
            return Ok(());
        }
        let config = self.config(member.guild_id).await?;

        if let Some(gate_channel_id) = config.gate_channel_id {
            let pending = PendingQuestionRepository::new(&self.state.db)
                .find_by_user_id(member.user_id)
                .await?;

            if pending.is_some() {
                self.post_rejoin_notice(gate_channel_id, member.user_id).await;
            } else {
                let rules = config
                    .rules_channel_id
                    .map(mention_channel)
                    .unwrap_or_else(|| "rules".to_string());
                let greeting = format!(
                    "Welcome {}, this server requires you to read the {} and answer a question regarding those before you gain full access.\n\nIf you have read the rules and are ready to answer the question, type ``{}`` and follow the instructions from the bot.\n\nPlease read the pinned message for more information.\nNever ping moderators unless you have issues which prevent you from completing the entry process.",
                    mention_user(member.user_id),
                    rules,
                    self.state.command("join")
                );
                outbound::send_expiring(
                    &self.state.discord,
                    gate_channel_id,
                    &greeting,
                    GREETING_LIFETIME,
                )
                .await;
            }
        } else if let Some(welcome_channel_id) = config.welcome_channel_id {
            WelcomeMessageService::new(&self.state.db)
                .welcome(
                    &self.state.discord,
                    member.guild_id,
                    welcome_channel_id,
                    member.user_id,
                    &member.name,
                )
                .await?;
        }

        tracing::debug!("Handled join of user {} in guild {}", member.user_id, member.guild_id);

        Ok(())
    }

    async fn post_rejoin_notice(&self, gate_channel_id: u64, user_id: u64) {
        let notice = format!(
            "{} Welcome back. We stored your last answer for you.\nA moderator can review it using `{} {}`",
            mention_user(user_id),
            self.state.command("review"),
            user_id
        );
        let Some(message_id) = outbound::send(&self.state.discord, gate_channel_id, &notice).await
        else {
            return;
        };

        outbound::react(
            &self.state.discord,
            gate_channel_id,
            message_id,
            REVIEW_REQUEST_EMOJI,
        )
        .await;
        let previous = self
            .state
            .notices
            .set(
                user_id,
                NoticeRef {
                    channel_id: gate_channel_id,
                    message_id,
                },
            )
            .await;
        if let Some(previous) = previous {
            outbound::delete(&self.state.discord, previous.channel_id, previous.message_id).await;
        }
    }

    /// Cleans up after a member who left before being accepted.
    ///
    /// # Arguments
    /// - `member` - Cached member data, if available; accepted members are skipped
    pub async fn on_member_leave(
        &self,
        guild_id: u64,
        user_id: u64,
        member: Option<&MemberSnapshot>,
    ) -> Result<(), AppError> {
        let config = self.config(guild_id).await?;
        let Some(gate_channel_id) = config.gate_channel_id else {
            return Ok(());
        };
        if let (Some(member), Some(role_id)) = (member, config.member_role_id) {
            if member.has_role(role_id) {
                return Ok(());
            }
        }

        if let Some(notice) = self.state.notices.take(user_id).await {
            outbound::delete(&self.state.discord, notice.channel_id, notice.message_id).await;
        }
        for handle in self
            .state
            .sequences
            .take_by_subject(user_id, SequenceKind::Question)
            .await
        {
            sequence::teardown(self.state, &handle).await;
        }
        self.clean_gate_channel(gate_channel_id, user_id).await?;

        tracing::info!("User {} left guild {} before being accepted", user_id, guild_id);

        Ok(())
    }

    /// Handles a member update by looking at the roles it added.
    ///
    /// Without the previous member state added roles can't be told apart.
    /// The member role is then treated as new while the user still has a
    /// stored answer or an "awaiting review" notice, i.e. while the gate is
    /// unfinished for them.
    pub async fn on_member_update(
        &self,
        old: Option<&MemberSnapshot>,
        new: &MemberSnapshot,
    ) -> Result<(), AppError> {
        let Some(old) = old else {
            return self.on_uncached_member_update(new).await;
        };

        for role_id in new.roles_added_since(old) {
            self.on_role_added(new, role_id).await?;
        }

        Ok(())
    }

    async fn on_uncached_member_update(&self, member: &MemberSnapshot) -> Result<(), AppError> {
        if member.is_bot {
            return Ok(());
        }
        let config = self.config(member.guild_id).await?;
        let Some(role_id) = config.member_role_id.filter(|role| member.has_role(*role)) else {
            return Ok(());
        };

        let unfinished = self.state.notices.contains(member.user_id).await
            || PendingQuestionRepository::new(&self.state.db)
                .exists(member.user_id)
                .await?;
        if !unfinished {
            return Ok(());
        }
        tracing::debug!(
            "Member update for user {} in guild {} arrived without previous state",
            member.user_id,
            member.guild_id
        );

        self.on_role_added(member, role_id).await
    }

    /// Finishes the gate for a member who received the member role.
    ///
    /// Welcomes the member, drops their stored answer and notice, and cleans
    /// their traces from the gate channel. Other roles are ignored.
    pub async fn on_role_added(&self, member: &MemberSnapshot, role_id: u64) -> Result<(), AppError> {
        if member.is_bot {
            return Ok(());
        }
        let config = self.config(member.guild_id).await?;
        if config.member_role_id != Some(role_id) {
            return Ok(());
        }

        if let Some(welcome_channel_id) = config.welcome_channel_id {
            WelcomeMessageService::new(&self.state.db)
                .welcome(
                    &self.state.discord,
                    member.guild_id,
                    welcome_channel_id,
                    member.user_id,
                    &member.name,
                )
                .await?;
        }

        PendingQuestionRepository::new(&self.state.db)
            .delete_by_user_id(member.user_id)
            .await?;
        // The notice mentions the user, so the channel cleanup removes it
        self.state.notices.take(member.user_id).await;

        if let Some(gate_channel_id) = config.gate_channel_id {
            self.clean_gate_channel(gate_channel_id, member.user_id).await?;
        }

        tracing::info!(
            "User {} was accepted into guild {}",
            member.user_id,
            member.guild_id
        );

        Ok(())
    }
}
