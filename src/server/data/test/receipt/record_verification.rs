use super::*;

/// Tests recording a successful verification.
///
/// Expected: Ok with the receipt verified and the matched messages stored
#[tokio::test]
async fn marks_receipt_verified() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let receipt = ReceiptFactory::new(db).build().await?;

    let outcome = VerificationOutcome {
        verified: true,
        matched_quantity: 12,
        expected_quantity: 10,
        matched_message_ids: vec!["1".to_string(), "2".to_string()],
        reason: None,
    };

    let updated = ReceiptRepository::new(db)
        .record_verification(receipt.id, &outcome)
        .await?
        .unwrap();

    assert_eq!(updated.status, ReceiptStatus::Verified);
    assert_eq!(updated.verified_quantity, Some(12));
    assert_eq!(updated.matched_message_ids, vec!["1", "2"]);
    assert!(updated.verified_at.is_some());
    assert!(updated.verification_note.is_none());

    Ok(())
}

/// Tests recording a failed verification.
///
/// Expected: Ok with the receipt still pending and the reason stored as note
#[tokio::test]
async fn keeps_receipt_pending_on_failure() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let receipt = ReceiptFactory::new(db).build().await?;

    let outcome = VerificationOutcome {
        verified: false,
        matched_quantity: 0,
        expected_quantity: 10,
        matched_message_ids: Vec::new(),
        reason: Some("no matching deposit found".to_string()),
    };

    let updated = ReceiptRepository::new(db)
        .record_verification(receipt.id, &outcome)
        .await?
        .unwrap();

    assert_eq!(updated.status, ReceiptStatus::Pending);
    assert_eq!(
        updated.verification_note.as_deref(),
        Some("no matching deposit found")
    );
    assert!(updated.verified_quantity.is_none());
    assert!(updated.verified_at.is_none());

    Ok(())
}

/// Tests recording a verification for a missing receipt.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_receipt() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let outcome = VerificationOutcome {
        verified: true,
        matched_quantity: 1,
        expected_quantity: 1,
        matched_message_ids: Vec::new(),
        reason: None,
    };

    let result = ReceiptRepository::new(db)
        .record_verification(42, &outcome)
        .await?;

    assert!(result.is_none());

    Ok(())
}
