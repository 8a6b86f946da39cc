use super::*;

/// Tests listing a guild's blacklisted words.
///
/// Expected: only the guild's own words, methods parsed
#[tokio::test]
async fn lists_words_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklisted_word(db, "1", "darn", "EXACT").await?;
    factory::create_blacklisted_word(db, "2", "heck", "CONTAINS").await?;

    let repo = BlacklistedWordRepository::new(db);
    let words = repo.get_by_guild_id(1).await?;

    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "darn");
    assert_eq!(words[0].method, FilterMethod::Exact);

    Ok(())
}

/// Tests that a corrupt filter method surfaces as an error.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn rejects_unknown_method() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklisted_word(db, "1", "darn", "FUZZY").await?;

    let repo = BlacklistedWordRepository::new(db);

    assert!(matches!(repo.get_by_guild_id(1).await, Err(DbErr::Custom(_))));

    Ok(())
}
