use super::*;
use crate::sequence::notice::NoticeRef;

/// Stores an answer for the member and opens a review of it.
async fn open_review(state: &BotState, db: &sea_orm::DatabaseConnection) -> Result<(), AppError> {
    create_gate(db).await?;
    factory::create_pending_question(db, &MEMBER_ID.to_string(), &GUILD_ID.to_string()).await?;
    review::start(state, MODERATOR_ID, CHANNEL_ID, GUILD_ID, MEMBER_ID).await
}

/// Tests approving by text.
///
/// Expected: member role granted, stored answer deleted, session gone
#[tokio::test]
async fn approve_grants_member_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["approve"]).await;

    assert_eq!(mock.roles_added(), vec![(GUILD_ID, MEMBER_ID, MEMBER_ROLE_ID)]);
    assert!(!PendingQuestionRepository::new(db).exists(MEMBER_ID).await?);
    assert!(mock
        .sent_to(CHANNEL_ID)
        .contains(&"The user has been approved.".to_string()));
    assert_eq!(state.sequences.len().await, 0);

    Ok(())
}

/// Tests that the ✅ reaction on the prompt behaves like "approve".
///
/// Expected: member role granted and the reaction is claimed
#[tokio::test]
async fn approve_reaction_equals_text() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    let prompt_id = mock.message_containing("The user answered with").unwrap();
    assert_eq!(
        mock.reactions_on(prompt_id),
        vec!["✅".to_string(), "❌".to_string(), "❓".to_string()]
    );

    let claimed = sequence::route_reaction(
        &state,
        &reaction(MODERATOR_ID, CHANNEL_ID, prompt_id, "✅"),
    )
    .await;

    assert!(claimed);
    assert_eq!(mock.roles_added(), vec![(GUILD_ID, MEMBER_ID, MEMBER_ROLE_ID)]);
    assert!(!PendingQuestionRepository::new(db).exists(MEMBER_ID).await?);

    Ok(())
}

/// Tests that reactions elsewhere or with other emoji are ignored.
///
/// Expected: nothing claimed and the session stays
#[tokio::test]
async fn unrelated_reactions_are_ignored() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;
    let prompt_id = mock.message_containing("The user answered with").unwrap();

    assert!(
        !sequence::route_reaction(&state, &reaction(MODERATOR_ID, CHANNEL_ID, prompt_id, "👍"))
            .await
    );
    assert!(
        !sequence::route_reaction(&state, &reaction(MODERATOR_ID, CHANNEL_ID, 1, "✅")).await
    );
    assert!(mock.roles_added().is_empty());
    assert_eq!(state.sequences.len().await, 1);

    Ok(())
}

/// Tests the silent rejection.
///
/// Expected: answer deleted, no role granted, no retry notice in the gate channel
#[tokio::test]
async fn noop_rejects_without_notice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["noop"]).await;

    assert!(mock.roles_added().is_empty());
    assert!(mock.sent_to(GATE_CHANNEL_ID).is_empty());
    assert!(!PendingQuestionRepository::new(db).exists(MEMBER_ID).await?);

    Ok(())
}

/// Tests rejection with a retry notice.
///
/// Expected: "try again" notice mentioning the member in the gate channel
#[tokio::test]
async fn reject_asks_member_to_retry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["Reject"]).await;

    assert_eq!(
        mock.sent_to(GATE_CHANNEL_ID),
        vec!["Your answer was incorrect <@20>.  You can use the `!join` command to try again."
            .to_string()]
    );
    assert!(mock.roles_added().is_empty());

    Ok(())
}

/// Tests rejection in a guild without a gate channel.
///
/// Expected: no retry notice in any channel and the member's notice removed
#[tokio::test]
async fn reject_without_gate_channel_sends_no_retry_notice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_member_gate::GuildMemberGateFactory::new(db)
        .guild_id(GUILD_ID.to_string())
        .member_role_id(Some(MEMBER_ROLE_ID.to_string().as_str()))
        .build()
        .await?;
    factory::create_pending_question(db, &MEMBER_ID.to_string(), &GUILD_ID.to_string()).await?;
    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    state
        .notices
        .set(
            MEMBER_ID,
            NoticeRef {
                channel_id: CHANNEL_ID,
                message_id: 9_000,
            },
        )
        .await;
    review::start(&state, MODERATOR_ID, CHANNEL_ID, GUILD_ID, MEMBER_ID).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["reject"]).await;

    assert!(!mock
        .sent_contents()
        .iter()
        .any(|m| m.starts_with("Your answer was incorrect")));
    assert!(!PendingQuestionRepository::new(db).exists(MEMBER_ID).await?);
    assert!(mock.deleted().contains(&9_000));
    assert!(!state.notices.contains(MEMBER_ID).await);
    assert_eq!(state.sequences.len().await, 0);

    Ok(())
}

/// Tests that an approval leaves the member's notice to the role update.
///
/// Expected: notice neither deleted nor dropped from the board after the grant
#[tokio::test]
async fn approve_hands_notice_to_role_update() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    state
        .notices
        .set(
            MEMBER_ID,
            NoticeRef {
                channel_id: GATE_CHANNEL_ID,
                message_id: 9_000,
            },
        )
        .await;
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["approve"]).await;

    assert_eq!(mock.roles_added().len(), 1);
    assert!(!mock.deleted().contains(&9_000));
    assert!(state.notices.contains(MEMBER_ID).await);

    Ok(())
}

/// Tests deciding on a member who already left.
///
/// Expected: no role grant and the "already left" reply
#[tokio::test]
async fn reject_after_member_left() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["reject"]).await;

    assert!(mock.sent_to(GATE_CHANNEL_ID).is_empty());
    assert!(mock
        .sent_to(CHANNEL_ID)
        .contains(&"The user already left; no further action is needed.".to_string()));

    Ok(())
}

/// Tests unknown text during a review.
///
/// Expected: the "Expecting one of" error and the session stays
#[tokio::test]
async fn unexpected_text_keeps_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    say(&state, MODERATOR_ID, CHANNEL_ID, &["perhaps"]).await;

    assert!(mock
        .sent_to(CHANNEL_ID)
        .iter()
        .any(|m| m.starts_with("Expecting one of the previously mentioned responses")));
    assert_eq!(state.sequences.len().await, 1);
    assert!(PendingQuestionRepository::new(db).exists(MEMBER_ID).await?);

    Ok(())
}

/// Tests deciding after another moderator already claimed the answer.
///
/// Expected: "no longer in the queue", no role grant, session destroyed
#[tokio::test]
async fn second_action_reports_no_longer_in_queue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, mock) = BotState::with_mock(db.clone());
    mock.add_member(GUILD_ID, MEMBER_ID, &[]);
    open_review(&state, db).await?;

    // Another moderator claims the answer out of band
    PendingQuestionRepository::new(db)
        .delete_by_user_id(MEMBER_ID)
        .await?;
    say(&state, MODERATOR_ID, CHANNEL_ID, &["approve"]).await;

    assert!(mock.roles_added().is_empty());
    assert!(mock
        .sent_to(CHANNEL_ID)
        .iter()
        .any(|m| m.starts_with("The user is no longer in the queue")));
    assert_eq!(state.sequences.len().await, 0);

    Ok(())
}

/// Tests opening a review for a user without a stored answer.
///
/// Expected: NotInReviewQueue and no session registered
#[tokio::test]
async fn start_fails_without_pending_answer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (state, _mock) = BotState::with_mock(db.clone());

    let result = review::start(&state, MODERATOR_ID, CHANNEL_ID, GUILD_ID, MEMBER_ID).await;

    assert!(matches!(
        result,
        Err(AppError::GateErr(crate::error::gate::GateError::NotInReviewQueue))
    ));
    assert_eq!(state.sequences.len().await, 0);

    Ok(())
}

/// Tests opening a review of a wiped answer.
///
/// Expected: ReviewInconsistent and no session registered
#[tokio::test]
async fn start_fails_on_blank_answer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_member_gate_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member_gate_question::MemberGateQuestionFactory::new(
        db,
        &MEMBER_ID.to_string(),
        &GUILD_ID.to_string(),
    )
    .question("")
    .answer("")
    .build()
    .await?;
    let (state, _mock) = BotState::with_mock(db.clone());

    let result = review::start(&state, MODERATOR_ID, CHANNEL_ID, GUILD_ID, MEMBER_ID).await;

    assert!(matches!(
        result,
        Err(AppError::GateErr(crate::error::gate::GateError::ReviewInconsistent))
    ));
    assert!(!state.sequences.contains_subject(MEMBER_ID, SequenceKind::Review).await);

    Ok(())
}
