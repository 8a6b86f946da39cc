use crate::{discord::outbound, error::AppError, gate::MemberGate};

/// How far back the gate channel is searched for a user's messages.
const CLEANUP_HISTORY_LIMIT: usize = 1000;

impl MemberGate<'_> {
    /// Deletes a user's traces from the gate channel.
    ///
    /// Removes messages written by the user or containing their id among the
    /// most recent messages of the channel; older messages are left alone.
    ///
    /// # Returns
    /// - Number of messages submitted for deletion
    pub async fn clean_gate_channel(
        &self,
        gate_channel_id: u64,
        user_id: u64,
    ) -> Result<usize, AppError> {
        let needle = user_id.to_string();
        let message_ids: Vec<u64> = self
            .state
            .discord
            .recent_messages(gate_channel_id, CLEANUP_HISTORY_LIMIT)
            .await?
            .into_iter()
            .filter(|m| m.author_id == user_id || m.content.contains(&needle))
            .map(|m| m.id)
            .collect();

        tracing::debug!(
            "Cleaning {} message(s) of user {} from gate channel {}",
            message_ids.len(),
            user_id,
            gate_channel_id
        );
        outbound::delete_many(&self.state.discord, gate_channel_id, &message_ids).await;

        Ok(message_ids.len())
    }
}
