use super::*;

/// Tests deleting a firm together with its roles.
///
/// Expected: Ok(true) and no firm or role rows left
#[tokio::test]
async fn deletes_firm_and_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::firm::FirmFactory::new(db)
        .access_roles(["1"])
        .build()
        .await?;

    let deleted = FirmRepository::new(db).delete(&created.id).await?;

    assert!(deleted);
    assert_eq!(entity::prelude::Firm::find().count(db).await?, 0);
    assert_eq!(entity::prelude::FirmAccessRole::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a missing firm.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_firm() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = FirmRepository::new(db).delete("missing").await?;

    assert!(!deleted);

    Ok(())
}
