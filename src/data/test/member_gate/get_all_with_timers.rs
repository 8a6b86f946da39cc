use super::*;

/// Tests selecting guilds for the purge job.
///
/// Verifies that only guilds with a gate channel, a member role and at least
/// one timer are returned.
///
/// Expected: only the fully configured guild
#[tokio::test]
async fn returns_only_actionable_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("10")
        .member_role_id(Some("1"))
        .gate_channel_id(Some("2"))
        .reminder_time_hours(Some(2))
        .build()
        .await?;
    // Timer but no gate channel
    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("11")
        .member_role_id(Some("1"))
        .remove_time_hours(Some(24))
        .build()
        .await?;
    // Gate but no timers
    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("12")
        .member_role_id(Some("1"))
        .gate_channel_id(Some("2"))
        .build()
        .await?;

    let repo = GuildMemberGateRepository::new(db);
    let configs = repo.get_all_with_timers().await?;

    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].guild_id, 10);

    Ok(())
}
