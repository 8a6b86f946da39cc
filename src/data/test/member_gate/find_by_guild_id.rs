use super::*;

/// Tests finding a configured guild.
///
/// Verifies that stored string ids and timers are converted into the domain
/// model.
///
/// Expected: Ok(Some) with every field parsed
#[tokio::test]
async fn finds_configured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("100")
        .member_role_id(Some("200"))
        .gate_channel_id(Some("300"))
        .remove_time_hours(Some(48))
        .build()
        .await?;

    let repo = GuildMemberGateRepository::new(db);
    let config = repo.find_by_guild_id(100).await?.unwrap();

    assert_eq!(config.guild_id, 100);
    assert_eq!(config.member_role_id, Some(200));
    assert_eq!(config.gate_channel_id, Some(300));
    assert_eq!(config.rules_channel_id, None);
    assert_eq!(config.remove_time_hours, Some(48));
    assert_eq!(config.reminder_time_hours, None);

    Ok(())
}

/// Tests finding a guild without a row.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildMemberGateRepository::new(db);

    assert!(repo.find_by_guild_id(404).await?.is_none());

    Ok(())
}
