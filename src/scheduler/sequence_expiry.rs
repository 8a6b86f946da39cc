use chrono::Utc;
use tokio_cron_scheduler::Job;

use crate::{error::AppError, sequence, state::BotState};

/// Builds the job that tears down idle sequences, running every minute.
pub fn job(state: BotState) -> Result<Job, AppError> {
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            let expired = sequence::expire_idle(&state, Utc::now()).await;
            if expired > 0 {
                tracing::info!(
                    "Expired {} idle sequences, {} still live",
                    expired,
                    state.sequences.len().await
                );
            }
        })
    })?;

    Ok(job)
}
