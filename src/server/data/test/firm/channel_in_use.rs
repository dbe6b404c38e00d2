use super::*;

/// Tests the channel uniqueness check with and without an excluded firm.
///
/// Expected: in use for other firms, free when the only user is excluded
#[tokio::test]
async fn detects_channel_used_by_other_firm() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let firm = factory::firm::FirmFactory::new(db)
        .channel_id("321")
        .build()
        .await?;

    let repo = FirmRepository::new(db);

    assert!(repo.channel_in_use("321", None).await?);
    assert!(!repo.channel_in_use("321", Some(&firm.id)).await?);
    assert!(!repo.channel_in_use("999", None).await?);

    Ok(())
}
