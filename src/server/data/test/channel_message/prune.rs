use super::*;

/// Tests that pruning keeps only the newest messages.
///
/// Expected: Ok(2) deleted and the three newest messages kept
#[tokio::test]
async fn keeps_newest_messages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for minutes in 0..5 {
        ChannelMessageFactory::new(db, "100")
            .message_id(format!("m{}", minutes))
            .timestamp(base_time() + Duration::minutes(minutes))
            .build()
            .await?;
    }

    let repo = ChannelMessageRepository::new(db);
    let deleted = repo.prune(3).await?;

    assert_eq!(deleted, 2);
    let remaining = repo.get_recent(None, 10).await?;
    let ids: Vec<&str> = remaining.iter().map(|m| m.message_id.as_str()).collect();
    assert_eq!(ids, vec!["m4", "m3", "m2"]);

    Ok(())
}

/// Tests pruning below the limit.
///
/// Expected: Ok(0) and nothing deleted
#[tokio::test]
async fn does_nothing_under_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ChannelMessageFactory::new(db, "100").build().await?;

    let deleted = ChannelMessageRepository::new(db).prune(10).await?;

    assert_eq!(deleted, 0);

    Ok(())
}
