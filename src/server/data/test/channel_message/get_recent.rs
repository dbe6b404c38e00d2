use super::*;

/// Tests that recent messages come newest first and respect the limit.
///
/// Expected: Ok with the two newest messages in descending order
#[tokio::test]
async fn returns_newest_first_with_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for minutes in 0..3 {
        ChannelMessageFactory::new(db, "100")
            .message_id(format!("m{}", minutes))
            .timestamp(base_time() + Duration::minutes(minutes))
            .build()
            .await?;
    }

    let messages = ChannelMessageRepository::new(db)
        .get_recent(None, 2)
        .await?;

    let ids: Vec<&str> = messages.iter().map(|m| m.message_id.as_str()).collect();
    assert_eq!(ids, vec!["m2", "m1"]);

    Ok(())
}

/// Tests filtering recent messages and counts by channel.
///
/// Expected: Ok with only the requested channel's messages
#[tokio::test]
async fn filters_by_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ChannelMessageFactory::new(db, "100").build().await?;
    ChannelMessageFactory::new(db, "100").build().await?;
    ChannelMessageFactory::new(db, "200").build().await?;

    let repo = ChannelMessageRepository::new(db);
    let messages = repo.get_recent(Some("200"), 10).await?;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].channel_id, "200");
    assert_eq!(repo.count(Some("100")).await?, 2);
    assert_eq!(repo.count(None).await?, 3);

    Ok(())
}
