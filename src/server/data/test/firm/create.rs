use super::*;

/// Tests creating a firm with access roles.
///
/// Expected: Ok with the firm and its roles returned and persisted
#[tokio::test]
async fn creates_firm_with_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FirmRepository::new(db);
    let firm = repo
        .create(create_param("fazenda", "111", &["1", "2"]))
        .await?;

    assert_eq!(firm.id, "fazenda");
    assert_eq!(firm.channel_id, "111");
    assert_eq!(firm.access_roles, vec!["1", "2"]);
    assert!(firm.enabled);

    let roles = entity::prelude::FirmAccessRole::find().count(db).await?;
    assert_eq!(roles, 2);

    Ok(())
}

/// Tests that two firms cannot share a channel.
///
/// Expected: Err from the unique index on channel_id
#[tokio::test]
async fn fails_for_duplicate_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FirmRepository::new(db);
    repo.create(create_param("a", "111", &[])).await?;

    let result = repo.create(create_param("b", "111", &[])).await;

    assert!(result.is_err());

    Ok(())
}
