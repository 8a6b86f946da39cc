use super::*;

/// Tests creating a configuration row for a new guild.
///
/// Expected: Ok with the row readable afterwards
#[tokio::test]
async fn inserts_new_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildMemberGateRepository::new(db);
    let mut config = GuildGateConfig::new(1);
    config.welcome_channel_id = Some(55);

    let stored = repo.upsert(&config).await?;

    assert_eq!(stored, config);
    assert_eq!(repo.find_by_guild_id(1).await?, Some(config));

    Ok(())
}

/// Tests overwriting an existing configuration row.
///
/// Verifies that fields set to None in the new config are cleared rather
/// than kept from the previous row.
///
/// Expected: Ok with cleared and updated fields
#[tokio::test]
async fn overwrites_existing_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("2")
        .member_role_id(Some("20"))
        .rules_channel_id(Some("21"))
        .build()
        .await?;

    let repo = GuildMemberGateRepository::new(db);
    let mut config = repo.find_by_guild_id(2).await?.unwrap();
    config.clear_gate();
    config.reminder_time_hours = Some(3);
    repo.upsert(&config).await?;

    let stored = repo.find_by_guild_id(2).await?.unwrap();
    assert_eq!(stored.member_role_id, None);
    assert_eq!(stored.rules_channel_id, None);
    assert_eq!(stored.reminder_time_hours, Some(3));

    Ok(())
}
