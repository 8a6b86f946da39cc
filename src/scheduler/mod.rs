//! Periodic jobs.
//!
//! Both jobs share one [`JobScheduler`] and run against a clone of the bot
//! state, so they see the same sequence registry as the event handlers.

pub mod member_gate_purge;
pub mod sequence_expiry;

use tokio_cron_scheduler::JobScheduler;

use crate::{error::AppError, state::BotState};

/// Starts the purge and sequence expiry jobs.
///
/// # Arguments
/// - `state`: Shared bot state, cloned into each job
pub async fn start_scheduler(state: BotState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(member_gate_purge::job(state.clone())?)
        .await?;
    scheduler.add(sequence_expiry::job(state)?).await?;
    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(())
}
