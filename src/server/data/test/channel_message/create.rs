use super::*;

/// Tests storing a message with embeds.
///
/// Expected: Ok with the embeds round-tripped through the JSON column
#[tokio::test]
async fn stores_message_with_embeds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut message = incoming("1", "");
    message.embeds.push(MessageEmbed {
        title: Some("DEPÓSITO".to_string()),
        author_name: Some("João".to_string()),
        ..Default::default()
    });

    let stored = ChannelMessageRepository::new(db)
        .create(CreateChannelMessageParam {
            channel_id: "100".to_string(),
            message: message.clone(),
            dedupe_key: "key-1".to_string(),
        })
        .await?;

    assert_eq!(stored.message_id, "1");
    assert_eq!(stored.channel_id, "100");
    assert_eq!(stored.author.name, "Farm Logger");
    assert_eq!(stored.embeds, message.embeds);
    assert_eq!(stored.timestamp, base_time());

    Ok(())
}

/// Tests that the same Discord message cannot be stored twice.
///
/// Expected: Err(DbErr) from the unique index on message_id
#[tokio::test]
async fn rejects_duplicate_message_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(ChannelMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelMessageRepository::new(db);
    repo.create(CreateChannelMessageParam {
        channel_id: "100".to_string(),
        message: incoming("1", "a"),
        dedupe_key: "key-1".to_string(),
    })
    .await?;

    let result = repo
        .create(CreateChannelMessageParam {
            channel_id: "100".to_string(),
            message: incoming("1", "b"),
            dedupe_key: "key-2".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
