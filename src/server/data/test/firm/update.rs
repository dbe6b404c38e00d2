use super::*;

/// Tests that updating a firm replaces its fields and roles.
///
/// Expected: Ok(Some) with new values and only the new roles stored
#[tokio::test]
async fn replaces_fields_and_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::firm::FirmFactory::new(db)
        .access_roles(["1", "2"])
        .build()
        .await?;

    let firm = FirmRepository::new(db)
        .update(
            &created.id,
            UpdateFirmParam {
                name: "Renamed".to_string(),
                description: Some("Farm".to_string()),
                channel_id: "777".to_string(),
                endpoint_url: Some("http://localhost/hook".to_string()),
                enabled: false,
                access_roles: vec!["3".to_string()],
            },
        )
        .await?
        .unwrap();

    assert_eq!(firm.name, "Renamed");
    assert_eq!(firm.channel_id, "777");
    assert_eq!(firm.endpoint_url.as_deref(), Some("http://localhost/hook"));
    assert!(!firm.enabled);
    assert_eq!(firm.access_roles, vec!["3"]);
    assert!(firm.updated_at >= created.updated_at);

    let roles = entity::prelude::FirmAccessRole::find().count(db).await?;
    assert_eq!(roles, 1);

    Ok(())
}

/// Tests updating a missing firm.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_firm() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = FirmRepository::new(db)
        .update(
            "missing",
            UpdateFirmParam {
                name: "Name".to_string(),
                description: None,
                channel_id: "1".to_string(),
                endpoint_url: None,
                enabled: true,
                access_roles: vec![],
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
