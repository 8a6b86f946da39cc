use super::*;

/// Tests deleting a welcome message by id.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let message = factory::create_welcome_message(db, "1", "https://x/y.png", "hi").await?;

    let repo = WelcomeMessageRepository::new(db);

    assert!(repo.delete(message.id).await?);
    assert!(!repo.delete(message.id).await?);

    Ok(())
}

/// Tests wiping every welcome message of a guild.
///
/// Expected: two rows removed, other guild untouched
#[tokio::test]
async fn deletes_all_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_welcome_message(db, "1", "https://x/1.png", "a").await?;
    factory::create_welcome_message(db, "1", "https://x/2.png", "b").await?;
    factory::create_welcome_message(db, "2", "https://x/3.png", "c").await?;

    let repo = WelcomeMessageRepository::new(db);

    assert_eq!(repo.delete_by_guild_id(1).await?, 2);
    assert_eq!(repo.get_by_guild_id(2).await?.len(), 1);

    Ok(())
}
