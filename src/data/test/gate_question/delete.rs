use super::*;

/// Tests removing a single question.
///
/// Expected: Ok(true) then Ok(false), remaining questions untouched
#[tokio::test]
async fn removes_single_question() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_gate_question(db, "1", "Keep?").await?;
    factory::create_gate_question(db, "1", "Drop?").await?;

    let repo = GateQuestionRepository::new(db);

    assert!(repo.delete(1, "Drop?").await?);
    assert!(!repo.delete(1, "Drop?").await?);
    assert_eq!(repo.get_by_guild_id(1).await?, vec!["Keep?".to_string()]);

    Ok(())
}

/// Tests wiping every question of a guild.
///
/// Expected: count of removed rows, other guilds untouched
#[tokio::test]
async fn removes_all_questions_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_gate_question(db, "1", "A?").await?;
    factory::create_gate_question(db, "1", "B?").await?;
    factory::create_gate_question(db, "2", "C?").await?;

    let repo = GateQuestionRepository::new(db);

    assert_eq!(repo.delete_by_guild_id(1).await?, 2);
    assert!(repo.get_by_guild_id(1).await?.is_empty());
    assert_eq!(repo.get_by_guild_id(2).await?.len(), 1);

    Ok(())
}
