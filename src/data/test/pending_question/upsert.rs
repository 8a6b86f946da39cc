use super::*;

/// Tests storing a user's answer.
///
/// Expected: Ok with the answer stored verbatim
#[tokio::test]
async fn stores_answer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PendingQuestionRepository::new(db);
    let stored = repo
        .upsert(CreatePendingQuestionParam {
            user_id: 5,
            guild_id: 1,
            question: "Favourite rule?".to_string(),
            answer: "  Rule 1, obviously ".to_string(),
        })
        .await?;

    assert_eq!(stored.user_id, 5);
    assert_eq!(stored.guild_id, 1);
    assert_eq!(stored.answer, "  Rule 1, obviously ");
    assert!(repo.exists(5).await?);

    Ok(())
}

/// Tests answering again after a previous answer.
///
/// Verifies that a user never has more than one stored answer.
///
/// Expected: Ok with the newer answer replacing the old one
#[tokio::test]
async fn replaces_previous_answer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member_gate_question::MemberGateQuestionFactory::new(db, "5", "1")
        .answer("old")
        .build()
        .await?;

    let repo = PendingQuestionRepository::new(db);
    repo.upsert(CreatePendingQuestionParam {
        user_id: 5,
        guild_id: 1,
        question: "Q?".to_string(),
        answer: "new".to_string(),
    })
    .await?;

    let stored = repo.find_by_user_id(5).await?.unwrap();
    assert_eq!(stored.answer, "new");
    assert_eq!(stored.question, "Q?");

    Ok(())
}
