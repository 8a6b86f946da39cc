//! Hourly purge of members who never finish the gate, and their reminders.

use std::{collections::HashSet, time::Duration};

use chrono::{DateTime, Utc};
use tokio_cron_scheduler::Job;

use crate::{
    data::{GuildMemberGateRepository, PendingQuestionRepository},
    discord::{mention_user, outbound},
    error::AppError,
    model::{event::MemberSnapshot, member_gate::GuildGateConfig},
    service::audit_log::AuditLogService,
    state::BotState,
};

pub const KICK_REASON_PURGE: &str = "Did not complete the entry process in time.";

const REMINDER_LIFETIME: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Kick a member who stayed past the purge time.
    Purge(u64),
    /// Remind a member that they still have to pass the gate.
    Remind(u64),
}

/// Builds the purge job, running at the start of every hour.
pub fn job(state: BotState) -> Result<Job, AppError> {
    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = process_member_gates(&state, Utc::now()).await {
                tracing::error!("Error processing member gate timers: {}", e);
            }
        })
    })?;

    Ok(job)
}

/// Runs purges and reminders for every guild with a gate timer.
///
/// A failing guild is logged and does not stop the others.
pub async fn process_member_gates(state: &BotState, now: DateTime<Utc>) -> Result<(), AppError> {
    let configs = GuildMemberGateRepository::new(&state.db)
        .get_all_with_timers()
        .await?;

    for config in configs {
        if let Err(e) = process_guild(state, &config, now).await {
            tracing::error!(
                "Error processing member gate timers for guild {}: {}",
                config.guild_id,
                e
            );
        }
    }

    Ok(())
}

async fn process_guild(
    state: &BotState,
    config: &GuildGateConfig,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Some(gate_channel_id) = config.gate_channel_id else {
        return Ok(());
    };

    let members = state.discord.members(config.guild_id).await?;
    let pending = PendingQuestionRepository::new(&state.db)
        .user_ids_by_guild_id(config.guild_id)
        .await?;

    for action in plan_gate_actions(config, &members, &pending, now) {
        match action {
            GateAction::Purge(user_id) => {
                match state
                    .discord
                    .kick(config.guild_id, user_id, KICK_REASON_PURGE)
                    .await
                {
                    Ok(()) => {
                        tracing::info!(
                            "Purged user {} from guild {} for not completing the gate",
                            user_id,
                            config.guild_id
                        );
                        AuditLogService::new(state)
                            .report_kick(config.guild_id, user_id, KICK_REASON_PURGE)
                            .await;
                    }
                    Err(e) => tracing::error!("Failed to purge user {}: {}", user_id, e),
                }
            }
            GateAction::Remind(user_id) => {
                let reminder = reminder_text(state, config, user_id);
                outbound::send_expiring(
                    &state.discord,
                    gate_channel_id,
                    &reminder,
                    REMINDER_LIFETIME,
                )
                .await;
            }
        }
    }

    Ok(())
}

/// Decides which members to purge or remind.
///
/// Bots, holders of the member role and users awaiting review are left alone,
/// as are members without a known join time. Purging wins over reminding.
pub fn plan_gate_actions(
    config: &GuildGateConfig,
    members: &[MemberSnapshot],
    pending_user_ids: &HashSet<u64>,
    now: DateTime<Utc>,
) -> Vec<GateAction> {
    let Some(member_role_id) = config.member_role_id else {
        return Vec::new();
    };

    members
        .iter()
        .filter(|m| !m.is_bot && !m.has_role(member_role_id))
        .filter(|m| !pending_user_ids.contains(&m.user_id))
        .filter_map(|m| {
            let joined_at = m.joined_at?;
            let hours = u64::try_from((now - joined_at).num_hours()).ok()?;

            if config.remove_time_hours.is_some_and(|purge| hours >= purge) {
                return Some(GateAction::Purge(m.user_id));
            }
            // Whole hours, so this is the [reminder, reminder + 1) window
            match config.reminder_time_hours {
                Some(remind) if hours == remind => Some(GateAction::Remind(m.user_id)),
                _ => None,
            }
        })
        .collect()
}

fn reminder_text(state: &BotState, config: &GuildGateConfig, user_id: u64) -> String {
    let mut text = format!(
        "{} You have not completed the entry process yet. Use `{}` to get access to the server.",
        mention_user(user_id),
        state.command("join")
    );
    if let Some(purge) = config.remove_time_hours {
        text.push_str(&format!(
            " Members who don't finish within {} hours of joining are removed.",
            purge
        ));
    }
    text
}
