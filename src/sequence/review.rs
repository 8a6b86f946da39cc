//! Moderator adjudication of a stored answer (`!review <user>` or ❔).

use std::time::Duration;

use crate::{
    data::PendingQuestionRepository,
    discord::{
        mention_user, outbound, split_message, APPROVE_EMOJI, MESSAGE_LIMIT, NOOP_EMOJI,
        REJECT_EMOJI,
    },
    error::{gate::GateError, AppError},
    model::event::{IncomingMessage, IncomingReaction},
    sequence::{self, Flow, Session, SessionCore},
    service::member_gate::MemberGateService,
    state::BotState,
};

const APPROVED_LIFETIME: Duration = Duration::from_secs(15);
const USER_LEFT_LIFETIME: Duration = Duration::from_secs(60);
const RETRY_NOTICE_LIFETIME: Duration = Duration::from_secs(60 * 60);

pub const APPROVE_REASON: &str = "Answer approved by a moderator.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Grant the member role.
    Approve,
    /// Ask the user to try again with a new question.
    Reject,
    /// Reject silently, a moderator follows up by hand.
    Noop,
}

impl ReviewDecision {
    pub fn from_text(content: &str) -> Option<Self> {
        match content.trim().to_lowercase().as_str() {
            "approve" | "accept" => Some(Self::Approve),
            "reject" | "refuse" => Some(Self::Reject),
            "noop" => Some(Self::Noop),
            _ => None,
        }
    }

    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            APPROVE_EMOJI => Some(Self::Approve),
            REJECT_EMOJI => Some(Self::Reject),
            NOOP_EMOJI => Some(Self::Noop),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ReviewFlow {
    reviewed_user_id: u64,
    /// Messages carrying the decision reactions.
    prompt_message_ids: Vec<u64>,
}

impl ReviewFlow {
    pub fn new(reviewed_user_id: u64) -> Self {
        Self {
            reviewed_user_id,
            prompt_message_ids: Vec::new(),
        }
    }

    pub fn reviewed_user_id(&self) -> u64 {
        self.reviewed_user_id
    }
}

/// Opens a review of a user's stored answer.
///
/// Nothing is registered when the user has no reviewable answer.
pub async fn start(
    state: &BotState,
    moderator_id: u64,
    channel_id: u64,
    guild_id: u64,
    reviewed_user_id: u64,
) -> Result<(), AppError> {
    let pending = PendingQuestionRepository::new(&state.db)
        .find_by_user_id(reviewed_user_id)
        .await?
        .ok_or(GateError::NotInReviewQueue)?;
    if pending.is_blank() {
        return Err(GateError::ReviewInconsistent.into());
    }

    let text = format!(
        "The user answered with the following question:\n```text\n{}\n{}```\nIf you want to approve the user respond with `approve`, to make the bot request the user to ask a new question respond with `reject` or to reject the user and take manual action answer with `noop` or use the reactions.",
        pending.question, pending.answer
    );
    let mut prompt_message_ids = Vec::new();
    for part in split_message(&text, MESSAGE_LIMIT) {
        let Some(id) = outbound::send(&state.discord, channel_id, &part).await else {
            continue;
        };
        prompt_message_ids.push(id);
        for emoji in [APPROVE_EMOJI, REJECT_EMOJI, NOOP_EMOJI] {
            outbound::react(&state.discord, channel_id, id, emoji).await;
        }
    }

    let mut session = Session::new(
        moderator_id,
        channel_id,
        Some(guild_id),
        Flow::Review(ReviewFlow {
            reviewed_user_id,
            prompt_message_ids: prompt_message_ids.clone(),
        }),
    );
    for id in prompt_message_ids {
        session.core.add_message_to_cleaner(id);
    }
    sequence::register(state, session).await;
    tracing::debug!(
        "Moderator {} started reviewing user {}",
        moderator_id,
        reviewed_user_id
    );

    Ok(())
}

pub(crate) async fn on_message(
    state: &BotState,
    core: &mut SessionCore,
    flow: &mut ReviewFlow,
    message: &IncomingMessage,
) -> Result<(), AppError> {
    if !core.accepts(message.author_id, message.channel_id) {
        return Ok(());
    }
    core.add_message_to_cleaner(message.message_id);

    let decision = ReviewDecision::from_text(&message.content)
        .ok_or_else(|| GateError::UnexpectedReviewResponse(message.content.clone()))?;

    decide(state, core, flow, decision).await
}

/// Handles a reaction on one of the review prompts.
///
/// # Returns
/// - `Ok(true)`: The reaction was a decision and has been acted on
/// - `Ok(false)`: The reaction is unrelated to this review
pub(crate) async fn on_reaction(
    state: &BotState,
    core: &mut SessionCore,
    flow: &mut ReviewFlow,
    reaction: &IncomingReaction,
) -> Result<bool, AppError> {
    if !core.accepts(reaction.user_id, reaction.channel_id)
        || !flow.prompt_message_ids.contains(&reaction.message_id)
    {
        return Ok(false);
    }
    let Some(decision) = ReviewDecision::from_emoji(&reaction.emoji) else {
        return Ok(false);
    };

    decide(state, core, flow, decision).await?;

    Ok(true)
}

/// Applies a decision once the stored answer is claimed.
///
/// Deleting the stored answer is the claim. When two moderators decide at
/// the same time only the one whose delete removed the row acts, the other
/// gets [`GateError::NoLongerInQueue`].
async fn decide(
    state: &BotState,
    core: &mut SessionCore,
    flow: &ReviewFlow,
    decision: ReviewDecision,
) -> Result<(), AppError> {
    let guild_id = core.require_guild_id()?;
    let user_id = flow.reviewed_user_id;
    let repo = PendingQuestionRepository::new(&state.db);

    if !repo.exists(user_id).await? {
        sequence::finish(state, core).await;
        return Err(GateError::NoLongerInQueue.into());
    }

    let config = MemberGateService::new(&state.db).get_config(guild_id).await?;
    let member = state.discord.member(guild_id, user_id).await?;

    if !repo.delete_by_user_id(user_id).await? {
        sequence::finish(state, core).await;
        return Err(GateError::NoLongerInQueue.into());
    }
    tracing::info!(
        "Moderator {} decided {:?} for user {} in guild {}",
        core.user_id(),
        decision,
        user_id,
        guild_id
    );

    let channel_id = core.channel_id();
    // The role update that follows a grant finishes the gate and removes the notice
    let mut notice_handed_to_gate = false;
    match (decision, member.is_some()) {
        (ReviewDecision::Approve, true) => {
            outbound::send_expiring(
                &state.discord,
                channel_id,
                "The user has been approved.",
                APPROVED_LIFETIME,
            )
            .await;
            match config.member_role_id {
                Some(role_id) => match state
                    .discord
                    .add_role(guild_id, user_id, role_id, APPROVE_REASON)
                    .await
                {
                    Ok(()) => notice_handed_to_gate = true,
                    Err(e) => {
                        tracing::error!("Failed to grant member role to user {}: {}", user_id, e)
                    }
                },
                None => tracing::warn!(
                    "Approved user {} but guild {} has no member role configured",
                    user_id,
                    guild_id
                ),
            }
        }
        (ReviewDecision::Approve, false) => {
            outbound::send_expiring(
                &state.discord,
                channel_id,
                "The user has left; no further action is needed.",
                APPROVED_LIFETIME,
            )
            .await;
        }
        (ReviewDecision::Reject, true) => {
            let notice = format!(
                "Your answer was incorrect {}.  You can use the `{}` command to try again.",
                mention_user(user_id),
                state.command("join")
            );
            match config.gate_channel_id {
                Some(gate_channel_id) => {
                    outbound::send_expiring(
                        &state.discord,
                        gate_channel_id,
                        &notice,
                        RETRY_NOTICE_LIFETIME,
                    )
                    .await;
                }
                None => tracing::warn!(
                    "Rejected user {} but guild {} has no gate channel for the retry notice",
                    user_id,
                    guild_id
                ),
            }
        }
        (ReviewDecision::Noop, true) => {}
        (ReviewDecision::Reject | ReviewDecision::Noop, false) => {
            outbound::send_expiring(
                &state.discord,
                channel_id,
                "The user already left; no further action is needed.",
                USER_LEFT_LIFETIME,
            )
            .await;
        }
    }

    if !notice_handed_to_gate {
        if let Some(notice) = state.notices.take(user_id).await {
            outbound::delete(&state.discord, notice.channel_id, notice.message_id).await;
        }
    }
    sequence::finish(state, core).await;

    Ok(())
}
