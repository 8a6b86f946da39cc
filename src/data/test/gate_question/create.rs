use super::*;

/// Tests adding a question.
///
/// Expected: Ok(true) and the question is listed
#[tokio::test]
async fn adds_question() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GateQuestionRepository::new(db);

    assert!(repo.create(1, "What is rule 3?").await?);
    assert_eq!(repo.get_by_guild_id(1).await?, vec!["What is rule 3?".to_string()]);

    Ok(())
}

/// Tests adding the same question twice.
///
/// Verifies that questions behave as a set per guild.
///
/// Expected: Ok(false) on the duplicate, only one row stored
#[tokio::test]
async fn ignores_duplicate_question() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GateQuestionRepository::new(db);
    repo.create(1, "Same?").await?;

    assert!(!repo.create(1, "Same?").await?);
    assert!(repo.create(2, "Same?").await?);
    assert_eq!(repo.get_by_guild_id(1).await?.len(), 1);

    Ok(())
}
