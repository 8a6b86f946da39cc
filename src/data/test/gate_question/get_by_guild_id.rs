use super::*;

/// Tests listing a guild's questions.
///
/// Verifies that questions come back in insertion order and that other
/// guilds' questions are excluded.
///
/// Expected: Ok with two questions in order
#[tokio::test]
async fn lists_questions_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_gate_question(db, "1", "First?").await?;
    factory::create_gate_question(db, "2", "Other guild?").await?;
    factory::create_gate_question(db, "1", "Second?").await?;

    let repo = GateQuestionRepository::new(db);
    let questions = repo.get_by_guild_id(1).await?;

    assert_eq!(questions, vec!["First?".to_string(), "Second?".to_string()]);

    Ok(())
}
