use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, User};

use crate::{gate::MemberGate, model::event::MemberSnapshot, state::BotState};

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(state: &BotState, _ctx: Context, new_member: Member) {
    let member = MemberSnapshot::from_member(&new_member);

    if let Err(e) = MemberGate::new(state).on_member_join(&member).await {
        tracing::error!(
            "Failed to handle join of user {} in guild {}: {}",
            member.user_id,
            member.guild_id,
            e
        );
    }
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    state: &BotState,
    _ctx: Context,
    guild_id: GuildId,
    user: User,
    member_data_if_available: Option<Member>,
) {
    let member = member_data_if_available
        .as_ref()
        .map(MemberSnapshot::from_member);

    if let Err(e) = MemberGate::new(state)
        .on_member_leave(guild_id.get(), user.id.get(), member.as_ref())
        .await
    {
        tracing::error!(
            "Failed to handle leave of user {} in guild {}: {}",
            user.id,
            guild_id,
            e
        );
    }
}

/// Handles the guild_member_update event, looking for newly added roles
pub async fn handle_guild_member_update(
    state: &BotState,
    _ctx: Context,
    old: Option<Member>,
    new: Option<Member>,
    _event: GuildMemberUpdateEvent,
) {
    let Some(new) = new else {
        return;
    };

    let old = old.as_ref().map(MemberSnapshot::from_member);
    let new = MemberSnapshot::from_member(&new);

    if let Err(e) = MemberGate::new(state)
        .on_member_update(old.as_ref(), &new)
        .await
    {
        tracing::error!(
            "Failed to handle update of user {} in guild {}: {}",
            new.user_id,
            new.guild_id,
            e
        );
    }
}
