use super::*;

/// Tests that receipts are listed newest first.
///
/// Expected: Ok with receipts in descending submission order
#[tokio::test]
async fn lists_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = ReceiptFactory::new(db)
        .submitted_at(now - Duration::hours(2))
        .build()
        .await?;
    let newer = ReceiptFactory::new(db).submitted_at(now).build().await?;

    let receipts = ReceiptRepository::new(db).list(None).await?;

    let ids: Vec<i32> = receipts.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests filtering the list by status.
///
/// Expected: Ok with only paid receipts
#[tokio::test]
async fn filters_by_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReceiptFactory::new(db).build().await?;
    let paid = ReceiptFactory::new(db).status("paid").build().await?;

    let receipts = ReceiptRepository::new(db)
        .list(Some(ReceiptStatus::Paid))
        .await?;

    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].id, paid.id);

    Ok(())
}

/// Tests that only recent pending receipts are returned for re-verification.
///
/// Expected: Ok with the pending receipt submitted after the cutoff
#[tokio::test]
async fn lists_pending_since_cutoff() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    ReceiptFactory::new(db)
        .submitted_at(now - Duration::hours(30))
        .build()
        .await?;
    ReceiptFactory::new(db)
        .status("verified")
        .submitted_at(now)
        .build()
        .await?;
    let recent = ReceiptFactory::new(db)
        .submitted_at(now - Duration::hours(1))
        .build()
        .await?;

    let receipts = ReceiptRepository::new(db)
        .list_pending_since(now - Duration::hours(24))
        .await?;

    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].id, recent.id);

    Ok(())
}
