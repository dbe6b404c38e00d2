use super::*;

/// Tests the message ID and dedupe key existence checks.
///
/// Expected: true only for stored values
#[tokio::test]
async fn checks_message_id_and_dedupe_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ChannelMessageFactory::new(db, "100")
        .message_id("555")
        .dedupe_key("100|42|1|hello")
        .build()
        .await?;

    let repo = ChannelMessageRepository::new(db);

    assert!(repo.exists_by_message_id("555").await?);
    assert!(!repo.exists_by_message_id("556").await?);
    assert!(repo.exists_by_dedupe_key("100|42|1|hello").await?);
    assert!(!repo.exists_by_dedupe_key("100|42|2|hello").await?);

    Ok(())
}
