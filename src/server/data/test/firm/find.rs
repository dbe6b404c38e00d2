use super::*;

/// Tests finding a firm by ID with its roles.
///
/// Expected: Ok(Some) with roles loaded
#[tokio::test]
async fn finds_firm_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::firm::FirmFactory::new(db)
        .access_roles(["9"])
        .build()
        .await?;

    let firm = FirmRepository::new(db).find_by_id(&created.id).await?;

    assert!(firm.is_some());
    assert_eq!(firm.unwrap().access_roles, vec!["9"]);

    Ok(())
}

/// Tests finding a missing firm.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let firm = FirmRepository::new(db).find_by_id("missing").await?;

    assert!(firm.is_none());

    Ok(())
}

/// Tests finding the firm bound to a channel.
///
/// Expected: Ok(Some) for the bound channel, Ok(None) for another
#[tokio::test]
async fn finds_firm_by_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::firm::FirmFactory::new(db)
        .channel_id("555")
        .build()
        .await?;

    let repo = FirmRepository::new(db);

    assert_eq!(
        repo.find_by_channel_id("555").await?.map(|f| f.id),
        Some(created.id)
    );
    assert!(repo.find_by_channel_id("556").await?.is_none());

    Ok(())
}

/// Tests listing firms ordered by name with their roles.
///
/// Expected: Ok with firms sorted by name
#[tokio::test]
async fn gets_all_firms_ordered_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::firm::FirmFactory::new(db).name("Zeta").build().await?;
    factory::firm::FirmFactory::new(db)
        .name("Alfa")
        .access_roles(["1"])
        .build()
        .await?;

    let firms = FirmRepository::new(db).get_all().await?;

    assert_eq!(firms.len(), 2);
    assert_eq!(firms[0].name, "Alfa");
    assert_eq!(firms[0].access_roles, vec!["1"]);
    assert_eq!(firms[1].name, "Zeta");
    assert!(firms[1].access_roles.is_empty());

    Ok(())
}
