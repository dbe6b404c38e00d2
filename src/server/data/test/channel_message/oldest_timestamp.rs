use super::*;

/// Tests that the oldest timestamp is found regardless of insertion order.
///
/// Expected: Ok(Some) with the earliest message timestamp
#[tokio::test]
async fn returns_earliest_timestamp() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (id, minutes) in [("late", 30), ("early", -10), ("middle", 5)] {
        ChannelMessageFactory::new(db, "100")
            .message_id(id)
            .timestamp(base_time() + Duration::minutes(minutes))
            .build()
            .await?;
    }

    let oldest = ChannelMessageRepository::new(db).oldest_timestamp().await?;

    assert_eq!(oldest, Some(base_time() - Duration::minutes(10)));

    Ok(())
}

/// Tests the oldest timestamp of an empty store.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_empty() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let oldest = ChannelMessageRepository::new(db).oldest_timestamp().await?;

    assert!(oldest.is_none());

    Ok(())
}
