//! Receipt lifecycle: `pending` → `verified` → `paid`, with `rejected` reachable
//! from `pending` and `verified`.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::str::FromStr;

use crate::{
    model::receipt::CreateReceiptDto,
    server::{
        data::{firm::FirmRepository, receipt::ReceiptRepository},
        error::AppError,
        model::receipt::{CreateReceiptParam, Receipt, ReceiptStatus, VerificationOutcome},
        service::activity::verification::ActivityVerificationService,
    },
};

/// Note stored on rejected receipts when none is provided
const DEFAULT_REJECT_NOTE: &str = "rejected by reviewer";

pub struct ReceiptService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReceiptService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending receipt
    ///
    /// # Returns
    /// - `Ok(Receipt)` - The created receipt
    /// - `Err(AppError::BadRequest)` - Invalid fields or unknown firm
    pub async fn create(&self, dto: CreateReceiptDto) -> Result<Receipt, AppError> {
        let param = CreateReceiptParam::from_dto(dto)?;

        if let Some(firm_id) = &param.firm_id {
            if FirmRepository::new(self.db)
                .find_by_id(firm_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Firm '{}' does not exist",
                    firm_id
                )));
            }
        }

        let receipt = ReceiptRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Receipt {} submitted by {} for {}x {}",
            receipt.id,
            receipt.player_name,
            receipt.quantity,
            receipt.item
        );

        Ok(receipt)
    }

    pub async fn get(&self, id: i32) -> Result<Receipt, AppError> {
        ReceiptRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))
    }

    /// Lists receipts newest first
    ///
    /// # Arguments
    /// - `status` - Optional status filter as sent by the client
    ///
    /// # Returns
    /// - `Ok(Vec<Receipt>)` - Matching receipts
    /// - `Err(AppError::BadRequest)` - Unknown status
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Receipt>, AppError> {
        let status = status
            .filter(|s| !s.trim().is_empty())
            .map(ReceiptStatus::from_str)
            .transpose()
            .map_err(AppError::BadRequest)?;

        ReceiptRepository::new(self.db).list(status).await
    }

    /// Verifies a pending receipt against the channel messages around its submission
    pub async fn verify(&self, id: i32) -> Result<(Receipt, VerificationOutcome), AppError> {
        let (receipt, outcome) = ActivityVerificationService::new(self.db).verify(id).await?;

        if outcome.verified {
            tracing::info!(
                "Receipt {} verified with {} matched",
                receipt.id,
                outcome.matched_quantity
            );
        }

        Ok((receipt, outcome))
    }

    /// Re-verifies pending receipts submitted at or after `since`
    ///
    /// Failures on individual receipts are logged and skipped.
    ///
    /// # Returns
    /// - `Ok(Vec<Receipt>)` - Receipts that became verified
    /// - `Err(AppError)` - Listing the pending receipts failed
    pub async fn reverify_pending(&self, since: DateTime<Utc>) -> Result<Vec<Receipt>, AppError> {
        let pending = ReceiptRepository::new(self.db)
            .list_pending_since(since)
            .await?;

        let mut verified = Vec::new();
        for receipt in pending {
            match self.verify(receipt.id).await {
                Ok((receipt, outcome)) if outcome.verified => verified.push(receipt),
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to re-verify receipt {}: {}", receipt.id, e),
            }
        }

        Ok(verified)
    }

    /// Rejects a pending or verified receipt
    ///
    /// # Returns
    /// - `Ok(Receipt)` - The rejected receipt
    /// - `Err(AppError::NotFound)` - No receipt with this ID exists
    /// - `Err(AppError::BadRequest)` - The receipt is already rejected or paid
    pub async fn reject(&self, id: i32, note: Option<String>) -> Result<Receipt, AppError> {
        let receipt = self.get(id).await?;

        if !matches!(
            receipt.status,
            ReceiptStatus::Pending | ReceiptStatus::Verified
        ) {
            return Err(AppError::BadRequest(format!(
                "Cannot reject a {} receipt",
                receipt.status.as_str()
            )));
        }

        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECT_NOTE.to_string());

        let receipt = ReceiptRepository::new(self.db)
            .set_status(id, ReceiptStatus::Rejected, Some(note))
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))?;

        tracing::info!("Receipt {} rejected", receipt.id);

        Ok(receipt)
    }

    /// Marks a verified receipt as paid
    ///
    /// # Returns
    /// - `Ok(Receipt)` - The paid receipt with `paid_at` set
    /// - `Err(AppError::NotFound)` - No receipt with this ID exists
    /// - `Err(AppError::BadRequest)` - The receipt is not verified
    pub async fn pay(&self, id: i32) -> Result<Receipt, AppError> {
        let receipt = self.get(id).await?;

        if receipt.status != ReceiptStatus::Verified {
            return Err(AppError::BadRequest(format!(
                "Only verified receipts can be paid, receipt is {}",
                receipt.status.as_str()
            )));
        }

        let receipt = ReceiptRepository::new(self.db)
            .set_status(id, ReceiptStatus::Paid, None)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))?;

        tracing::info!(
            "Receipt {} paid ({} total)",
            receipt.id,
            receipt.total_value()
        );

        Ok(receipt)
    }
}
