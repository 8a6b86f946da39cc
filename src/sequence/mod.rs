//! Multi-step conversational sequences.
//!
//! A sequence is a dialogue with one user in one channel, started by a command
//! or a reaction and driven by that user's follow-up messages (and, for
//! reviews, reactions). Each live sequence is a [`Session`]: common
//! bookkeeping in [`SessionCore`] plus a [`Flow`] holding the state machine of
//! its kind.
//!
//! Sessions live in the [`registry::SequenceRegistry`] keyed by
//! `(user, channel, kind)`. The functions in this module are the dispatcher:
//! they route events to matching sessions, serialize events per session
//! through the session's mutex, and tear sessions down once destroyed.
//!
//! Lock order is always registry first, released, then session. A handler
//! running under a session lock never touches the registry.

pub mod configure;
pub mod notice;
pub mod question;
pub mod registry;
pub mod review;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{
    discord::outbound,
    error::AppError,
    model::event::{IncomingMessage, IncomingReaction},
    sequence::{
        configure::ConfigureFlow, question::QuestionFlow, registry::SessionHandle,
        review::ReviewFlow,
    },
    state::BotState,
};

/// Lifetime of error replies posted in response to session input.
const ERROR_REPLY_LIFETIME: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SequenceKind {
    Question,
    Configure,
    Review,
}

/// Identity of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user_id: u64,
    pub channel_id: u64,
    pub kind: SequenceKind,
}

/// Bookkeeping shared by every kind of sequence.
#[derive(Debug)]
pub struct SessionCore {
    user_id: u64,
    channel_id: u64,
    guild_id: Option<u64>,
    inform_user: bool,
    cleanup: Vec<u64>,
    destroyed: bool,
    last_activity: DateTime<Utc>,
}

impl SessionCore {
    pub fn new(user_id: u64, channel_id: u64, guild_id: Option<u64>, inform_user: bool) -> Self {
        Self {
            user_id,
            channel_id,
            guild_id,
            inform_user,
            cleanup: Vec::new(),
            destroyed: false,
            last_activity: Utc::now(),
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// Guild of the session, or an internal error for private channels.
    ///
    /// Every flow is started from a guild channel, so a missing guild here is
    /// a programming error rather than user input.
    pub fn require_guild_id(&self) -> Result<u64, AppError> {
        self.guild_id
            .ok_or_else(|| AppError::InternalError("Sequence has no guild".to_string()))
    }

    /// Whether an event from `user_id` in `channel_id` belongs to this session.
    pub fn accepts(&self, user_id: u64, channel_id: u64) -> bool {
        !self.destroyed && self.user_id == user_id && self.channel_id == channel_id
    }

    /// Records a message id for deletion when the session is destroyed.
    pub fn add_message_to_cleaner(&mut self, message_id: u64) {
        self.cleanup.push(message_id);
    }

    /// Marks the session destroyed.
    ///
    /// The first call yields the tracked message ids when the session informs
    /// its user, and nothing otherwise. Later calls always yield nothing.
    pub fn destroy(&mut self) -> Vec<u64> {
        if self.destroyed {
            return Vec::new();
        }
        self.destroyed = true;

        let tracked = std::mem::take(&mut self.cleanup);
        if self.inform_user {
            tracked
        } else {
            Vec::new()
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }
}

/// State machine of one kind of sequence.
#[derive(Debug)]
pub enum Flow {
    Question(QuestionFlow),
    Configure(ConfigureFlow),
    Review(ReviewFlow),
}

impl Flow {
    pub fn kind(&self) -> SequenceKind {
        match self {
            Self::Question(_) => SequenceKind::Question,
            Self::Configure(_) => SequenceKind::Configure,
            Self::Review(_) => SequenceKind::Review,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub core: SessionCore,
    pub flow: Flow,
}

impl Session {
    /// Creates a session; only member-facing question sessions keep their
    /// messages when destroyed.
    pub fn new(user_id: u64, channel_id: u64, guild_id: Option<u64>, flow: Flow) -> Self {
        let inform_user = !matches!(flow, Flow::Question(_));

        Self {
            core: SessionCore::new(user_id, channel_id, guild_id, inform_user),
            flow,
        }
    }

    pub fn key(&self) -> SessionKey {
        SessionKey {
            user_id: self.core.user_id,
            channel_id: self.core.channel_id,
            kind: self.flow.kind(),
        }
    }

    /// User this session is about: the reviewed user for reviews, the
    /// session owner otherwise.
    pub fn subject(&self) -> u64 {
        match &self.flow {
            Flow::Review(review) => review.reviewed_user_id(),
            _ => self.core.user_id,
        }
    }
}

/// Destroys a session from inside its handler and deletes its tracked messages.
pub(crate) async fn finish(state: &BotState, core: &mut SessionCore) {
    let tracked = core.destroy();
    outbound::delete_many(&state.discord, core.channel_id(), &tracked).await;
}

/// Registers a started session, tearing down every session it displaces.
pub async fn register(state: &BotState, session: Session) -> SessionHandle {
    let key = session.key();
    let (handle, displaced) = state.sequences.insert(session).await;

    for old in displaced {
        tracing::debug!("Sequence {:?} displaced an older sequence", key);
        teardown(state, &old).await;
    }

    handle
}

/// Destroys a session from outside its handler.
///
/// Safe to call on a session that already finished: destroy is idempotent and
/// registry removal only drops the exact handle given.
pub async fn teardown(state: &BotState, handle: &SessionHandle) {
    let (key, channel_id, tracked) = {
        let mut session = handle.lock().await;
        let tracked = session.core.destroy();
        (session.key(), session.core.channel_id(), tracked)
    };

    state.sequences.remove(&key, handle).await;
    outbound::delete_many(&state.discord, channel_id, &tracked).await;
}

/// Routes a message to the live sessions of its author in its channel.
///
/// # Returns
/// - `true` when at least one live session received the message
pub async fn route_message(state: &BotState, message: &IncomingMessage) -> bool {
    let handles = state
        .sequences
        .find(message.author_id, message.channel_id)
        .await;

    let mut routed = false;
    for handle in handles {
        let (key, result) = {
            let mut session = handle.lock().await;
            if !session.core.accepts(message.author_id, message.channel_id) {
                continue;
            }
            routed = true;
            session.core.touch(Utc::now());

            let key = session.key();
            let Session { core, flow } = &mut *session;
            let result = match flow {
                Flow::Question(flow) => question::on_message(state, core, flow, message).await,
                Flow::Configure(flow) => configure::on_message(state, core, flow, message).await,
                Flow::Review(flow) => review::on_message(state, core, flow, message).await,
            };
            (key, result)
        };

        settle(state, &key, &handle, message.channel_id, result).await;
    }

    routed
}

/// Routes a reaction to the live sessions of the reacting user in its channel.
///
/// # Returns
/// - `true` when a session claimed the reaction
pub async fn route_reaction(state: &BotState, reaction: &IncomingReaction) -> bool {
    let handles = state
        .sequences
        .find(reaction.user_id, reaction.channel_id)
        .await;

    let mut claimed = false;
    for handle in handles {
        let (key, result) = {
            let mut session = handle.lock().await;
            if !session.core.accepts(reaction.user_id, reaction.channel_id) {
                continue;
            }

            let key = session.key();
            let Session { core, flow } = &mut *session;
            let result = match flow {
                Flow::Review(flow) => review::on_reaction(state, core, flow, reaction).await,
                // Question and configure sessions only take messages
                Flow::Question(_) | Flow::Configure(_) => continue,
            };
            if matches!(result, Ok(true) | Err(_)) {
                claimed = true;
                core.touch(Utc::now());
            }
            (key, result.map(|_| ()))
        };

        settle(state, &key, &handle, reaction.channel_id, result).await;
    }

    claimed
}

/// Reports a handler error and drops the session from the registry once it
/// destroyed itself.
async fn settle(
    state: &BotState,
    key: &SessionKey,
    handle: &SessionHandle,
    channel_id: u64,
    result: Result<(), AppError>,
) {
    if let Err(e) = result {
        if e.is_user_facing() {
            tracing::debug!("Sequence {:?} rejected input: {}", key, e);
        }
        outbound::send_expiring(
            &state.discord,
            channel_id,
            &e.user_message(),
            ERROR_REPLY_LIFETIME,
        )
        .await;
    }

    if handle.lock().await.core.is_destroyed() {
        state.sequences.remove(key, handle).await;
    }
}

/// Destroys every session idle for longer than the configured timeout.
///
/// Sessions currently handling an event are skipped; they are by definition
/// not idle.
///
/// # Returns
/// - Number of sessions destroyed
pub async fn expire_idle(state: &BotState, now: DateTime<Utc>) -> usize {
    let cutoff = now - state.settings.sequence_timeout;
    let mut expired = 0;

    for (key, handle) in state.sequences.snapshot().await {
        let (channel_id, tracked) = {
            let Ok(mut session) = handle.try_lock() else {
                continue;
            };
            if session.core.last_activity() > cutoff {
                continue;
            }
            (session.core.channel_id(), session.core.destroy())
        };

        state.sequences.remove(&key, &handle).await;
        outbound::delete_many(&state.discord, channel_id, &tracked).await;
        expired += 1;
        tracing::debug!("Sequence {:?} expired after inactivity", key);
    }

    expired
}

#[cfg(test)]
mod test;
