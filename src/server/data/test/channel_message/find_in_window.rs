use super::*;

/// Tests that the window is inclusive and ordered oldest first.
///
/// Expected: Ok with messages on both bounds but none outside
#[tokio::test]
async fn returns_messages_within_inclusive_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (id, offset) in [("before", -6), ("start", -5), ("middle", 0), ("end", 5), ("after", 6)] {
        ChannelMessageFactory::new(db, "100")
            .message_id(id)
            .timestamp(base_time() + Duration::minutes(offset))
            .build()
            .await?;
    }

    let messages = ChannelMessageRepository::new(db)
        .find_in_window(
            None,
            base_time() - Duration::minutes(5),
            base_time() + Duration::minutes(5),
        )
        .await?;

    let ids: Vec<&str> = messages.iter().map(|m| m.message_id.as_str()).collect();
    assert_eq!(ids, vec!["start", "middle", "end"]);

    Ok(())
}

/// Tests restricting the window to a channel.
///
/// Expected: Ok with only messages from the requested channel
#[tokio::test]
async fn restricts_window_to_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ChannelMessageFactory::new(db, "100")
        .timestamp(base_time())
        .build()
        .await?;
    ChannelMessageFactory::new(db, "200")
        .timestamp(base_time())
        .build()
        .await?;

    let messages = ChannelMessageRepository::new(db)
        .find_in_window(
            Some("200"),
            base_time() - Duration::minutes(1),
            base_time() + Duration::minutes(1),
        )
        .await?;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].channel_id, "200");

    Ok(())
}
