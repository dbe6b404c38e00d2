use super::*;

/// Tests creating a receipt.
///
/// Expected: Ok with a pending receipt and no verification data
#[tokio::test]
async fn creates_pending_receipt() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let submitted_at = Utc::now();
    let receipt = ReceiptRepository::new(db)
        .create(CreateReceiptParam {
            firm_id: Some("fazenda-norte".to_string()),
            player_id: "123".to_string(),
            player_name: "João Silva".to_string(),
            kind: ReceiptKind::Animal,
            item: "Galinha".to_string(),
            quantity: 4,
            unit_price: 150,
            submitted_at,
        })
        .await?;

    assert_eq!(receipt.status, ReceiptStatus::Pending);
    assert_eq!(receipt.kind, ReceiptKind::Animal);
    assert_eq!(receipt.firm_id.as_deref(), Some("fazenda-norte"));
    assert_eq!(receipt.total_value(), 600);
    assert!(receipt.matched_message_ids.is_empty());
    assert!(receipt.verified_at.is_none());
    assert!(receipt.paid_at.is_none());

    Ok(())
}

/// Tests finding a missing receipt.
///
/// Expected: Ok(None)
#[tokio::test]
async fn find_returns_none_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Receipt).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ReceiptRepository::new(db).find_by_id(999).await?;

    assert!(result.is_none());

    Ok(())
}
