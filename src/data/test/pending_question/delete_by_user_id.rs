use super::*;

/// Tests that only the first delete claims the row.
///
/// Verifies the behaviour reviews rely on when two moderators act on the
/// same answer.
///
/// Expected: true for the first call, false for the second
#[tokio::test]
async fn first_delete_wins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_pending_question(db, "9", "1").await?;

    let repo = PendingQuestionRepository::new(db);

    assert!(repo.delete_by_user_id(9).await?);
    assert!(!repo.delete_by_user_id(9).await?);
    assert!(!repo.exists(9).await?);

    Ok(())
}
