//! Screening dialogue a new member goes through after `!join`.

use std::time::Duration;

use crate::{
    data::PendingQuestionRepository,
    discord::{mention_user, outbound, REVIEW_REQUEST_EMOJI},
    error::AppError,
    model::{event::IncomingMessage, pending_question::CreatePendingQuestionParam},
    sequence::{self, notice::NoticeRef, Flow, Session, SessionCore},
    service::audit_log::AuditLogService,
    state::BotState,
};

const READ_RULES_REFUSED_LIFETIME: Duration = Duration::from_secs(60);

pub const KICK_REASON_RULES_REFUSED: &str = "Doesn't agree with the rules.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStep {
    AskedReadRules,
    AskedAcceptRules,
    AwaitingAnswer,
}

#[derive(Debug)]
pub struct QuestionFlow {
    step: QuestionStep,
    question: String,
}

impl QuestionFlow {
    pub fn new(question: String) -> Self {
        Self {
            step: QuestionStep::AskedReadRules,
            question,
        }
    }
}

enum YesNo {
    Yes,
    No,
}

fn parse_yes_no(content: &str) -> Option<YesNo> {
    match content.trim().to_lowercase().as_str() {
        "yes" => Some(YesNo::Yes),
        "no" => Some(YesNo::No),
        _ => None,
    }
}

/// Starts the screening dialogue for a member with the given question.
pub async fn start(
    state: &BotState,
    user_id: u64,
    channel_id: u64,
    guild_id: u64,
    question: String,
) -> Result<(), AppError> {
    let mut session = Session::new(
        user_id,
        channel_id,
        Some(guild_id),
        Flow::Question(QuestionFlow::new(question)),
    );

    let prompt = format!(
        "{} Have you read the rules? answer with `yes` or `no`",
        mention_user(user_id)
    );
    if let Some(id) = outbound::send(&state.discord, channel_id, &prompt).await {
        session.core.add_message_to_cleaner(id);
    }

    sequence::register(state, session).await;
    tracing::debug!("Started question sequence for user {}", user_id);

    Ok(())
}

pub(crate) async fn on_message(
    state: &BotState,
    core: &mut SessionCore,
    flow: &mut QuestionFlow,
    message: &IncomingMessage,
) -> Result<(), AppError> {
    if !core.accepts(message.author_id, message.channel_id) {
        return Ok(());
    }
    core.add_message_to_cleaner(message.message_id);

    match flow.step {
        QuestionStep::AskedReadRules => match parse_yes_no(&message.content) {
            Some(YesNo::Yes) => {
                prompt(state, core, "Do you accept the rules? Answer with `yes` or `no`").await;
                flow.step = QuestionStep::AskedAcceptRules;
            }
            Some(YesNo::No) => {
                sequence::finish(state, core).await;
                outbound::send_expiring(
                    &state.discord,
                    core.channel_id(),
                    "Please read the rules, before using this command.",
                    READ_RULES_REFUSED_LIFETIME,
                )
                .await;
            }
            None => reprompt(state, core).await,
        },
        QuestionStep::AskedAcceptRules => match parse_yes_no(&message.content) {
            Some(YesNo::Yes) => {
                let text = format!("Please answer the following question:\n{}", flow.question);
                prompt(state, core, &text).await;
                flow.step = QuestionStep::AwaitingAnswer;
            }
            Some(YesNo::No) => {
                let guild_id = core.require_guild_id()?;
                sequence::finish(state, core).await;

                match state
                    .discord
                    .kick(guild_id, core.user_id(), KICK_REASON_RULES_REFUSED)
                    .await
                {
                    Ok(()) => {
                        tracing::info!(
                            "Kicked user {} from guild {} for refusing the rules",
                            core.user_id(),
                            guild_id
                        );
                        AuditLogService::new(state)
                            .report_kick(guild_id, core.user_id(), KICK_REASON_RULES_REFUSED)
                            .await;
                    }
                    Err(e) => tracing::error!("Failed to kick user {}: {}", core.user_id(), e),
                }
            }
            None => reprompt(state, core).await,
        },
        QuestionStep::AwaitingAnswer => {
            let guild_id = core.require_guild_id()?;
            sequence::finish(state, core).await;
            submit_answer(state, core, guild_id, &flow.question, &message.content).await?;
        }
    }

    Ok(())
}

/// Stores the answer and posts the "awaiting review" notice.
async fn submit_answer(
    state: &BotState,
    core: &SessionCore,
    guild_id: u64,
    question: &str,
    answer: &str,
) -> Result<(), AppError> {
    let user_id = core.user_id();

    PendingQuestionRepository::new(&state.db)
        .upsert(CreatePendingQuestionParam {
            user_id,
            guild_id,
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .await?;
    tracing::info!("User {} answered their gate question in guild {}", user_id, guild_id);

    let notice = format!(
        "{} Please wait while a moderator manually checks your answer. You might be asked (an) other question(s).\n\nA moderator can use `{} {}`",
        mention_user(user_id),
        state.command("review"),
        user_id
    );
    let Some(message_id) = outbound::send(&state.discord, core.channel_id(), &notice).await else {
        return Ok(());
    };

    if let Some(previous) = state
        .notices
        .set(
            user_id,
            NoticeRef {
                channel_id: core.channel_id(),
                message_id,
            },
        )
        .await
    {
        outbound::delete(&state.discord, previous.channel_id, previous.message_id).await;
    }
    outbound::react(&state.discord, core.channel_id(), message_id, REVIEW_REQUEST_EMOJI).await;

    Ok(())
}

async fn prompt(state: &BotState, core: &mut SessionCore, text: &str) {
    if let Some(id) = outbound::send(&state.discord, core.channel_id(), text).await {
        core.add_message_to_cleaner(id);
    }
}

async fn reprompt(state: &BotState, core: &mut SessionCore) {
    prompt(state, core, "Invalid response! Answer with `yes` or `no`!").await;
}
