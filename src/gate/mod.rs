//! Member gate orchestration.
//!
//! [`MemberGate`] turns platform events and gate commands into sequence starts
//! and housekeeping: greeting joining members, cleaning up after members who
//! leave or get accepted, and bridging ❔ reactions on review notices into
//! review sessions.

mod cleanup;
mod command;
mod member;
mod reaction;

#[cfg(test)]
mod test;

use std::time::Duration;

use crate::{
    discord::outbound,
    error::AppError,
    model::member_gate::GuildGateConfig,
    service::member_gate::MemberGateService,
    state::BotState,
};

/// Lifetime of error replies to gate commands and reactions.
const ERROR_REPLY_LIFETIME: Duration = Duration::from_secs(60);

pub struct MemberGate<'a> {
    state: &'a BotState,
}

impl<'a> MemberGate<'a> {
    pub fn new(state: &'a BotState) -> Self {
        Self { state }
    }

    async fn config(&self, guild_id: u64) -> Result<GuildGateConfig, AppError> {
        MemberGateService::new(&self.state.db)
            .get_config(guild_id)
            .await
    }

    /// Posts an error in the channel it happened in.
    async fn report(&self, channel_id: u64, error: &AppError) {
        outbound::send_expiring(
            &self.state.discord,
            channel_id,
            &error.user_message(),
            ERROR_REPLY_LIFETIME,
        )
        .await;
    }
}
