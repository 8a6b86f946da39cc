use super::*;
use sea_orm::EntityTrait;

/// Tests storing a blacklisted word.
///
/// Expected: Ok with the filter method persisted by name
#[tokio::test]
async fn stores_word() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistedWordRepository::new(db);
    let word = repo
        .create(CreateBlacklistedWordParam {
            guild_id: 1,
            word: "heck".to_string(),
            method: FilterMethod::StartsWith,
        })
        .await?;

    assert_eq!(word.method, FilterMethod::StartsWith);

    let stored = entity::prelude::BlacklistedWord::find_by_id(word.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.filter_method, "STARTS_WITH");

    Ok(())
}
