use super::*;

/// Tests collecting users with stored answers per guild.
///
/// Expected: only users of the requested guild
#[tokio::test]
async fn collects_users_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_pending_question(db, "1", "100").await?;
    factory::create_pending_question(db, "2", "100").await?;
    factory::create_pending_question(db, "3", "200").await?;

    let repo = PendingQuestionRepository::new(db);
    let users = repo.user_ids_by_guild_id(100).await?;

    assert_eq!(users.len(), 2);
    assert!(users.contains(&1));
    assert!(users.contains(&2));
    assert!(!users.contains(&3));

    Ok(())
}
