use super::*;

/// Tests finding a stored answer.
///
/// Expected: Ok(Some) for the stored user, Ok(None) for others
#[tokio::test]
async fn finds_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_pending_question(db, "7", "1").await?;

    let repo = PendingQuestionRepository::new(db);
    let found = repo.find_by_user_id(7).await?.unwrap();

    assert_eq!(found.question, "What is the first rule?");
    assert_eq!(found.answer, "Be respectful");
    assert!(!found.is_blank());
    assert!(repo.find_by_user_id(8).await?.is_none());

    Ok(())
}
