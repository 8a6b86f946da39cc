use super::*;

/// Tests deleting a guild's configuration.
///
/// Expected: true on the first delete, false once the row is gone
#[tokio::test]
async fn deletes_config_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id("3")
        .build()
        .await?;

    let repo = GuildMemberGateRepository::new(db);

    assert!(repo.delete(3).await?);
    assert!(!repo.delete(3).await?);
    assert!(repo.find_by_guild_id(3).await?.is_none());

    Ok(())
}
