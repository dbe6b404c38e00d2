use super::*;

/// Tests marking a receipt as paid.
///
/// Expected: Ok with status paid and paid_at set
#[tokio::test]
async fn sets_paid_at_when_paid() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let receipt = ReceiptFactory::new(db).status("verified").build().await?;

    let updated = ReceiptRepository::new(db)
        .set_status(receipt.id, ReceiptStatus::Paid, None)
        .await?
        .unwrap();

    assert_eq!(updated.status, ReceiptStatus::Paid);
    assert!(updated.paid_at.is_some());

    Ok(())
}

/// Tests rejecting a receipt with a note.
///
/// Expected: Ok with status rejected, the note stored and no paid_at
#[tokio::test]
async fn stores_note_on_reject() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let receipt = ReceiptFactory::new(db).build().await?;

    let updated = ReceiptRepository::new(db)
        .set_status(
            receipt.id,
            ReceiptStatus::Rejected,
            Some("quantidade divergente".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, ReceiptStatus::Rejected);
    assert_eq!(
        updated.verification_note.as_deref(),
        Some("quantidade divergente")
    );
    assert!(updated.paid_at.is_none());

    Ok(())
}
