use super::*;

/// Tests creating a welcome message.
///
/// Expected: Ok with the message listed for its guild only
#[tokio::test]
async fn creates_message() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WelcomeMessageRepository::new(db);
    let created = repo
        .create(CreateWelcomeMessageParam {
            guild_id: 1,
            image_url: "https://example.com/a.png".to_string(),
            message: "Welcome {user}!".to_string(),
        })
        .await?;

    let listed = repo.get_by_guild_id(1).await?;
    assert_eq!(listed, vec![created]);
    assert!(repo.get_by_guild_id(2).await?.is_empty());

    Ok(())
}
