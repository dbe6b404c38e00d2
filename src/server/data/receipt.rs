//! Receipt data repository for database operations
//!
//! Provides the `ReceiptRepository` for farm service receipts and their
//! verification/payment state transitions.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::receipt::{CreateReceiptParam, Receipt, ReceiptStatus, VerificationOutcome},
};

/// Repository providing database operations for receipt management.
pub struct ReceiptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReceiptRepository<'a> {
    /// Creates a new ReceiptRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReceiptRepository` - new repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new pending receipt
    ///
    /// # Arguments
    /// - `param` - Validated creation parameters
    ///
    /// # Returns
    /// - `Ok(Receipt)` - The created receipt
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateReceiptParam) -> Result<Receipt, AppError> {
        let entity = entity::receipt::ActiveModel {
            id: ActiveValue::NotSet,
            firm_id: ActiveValue::Set(param.firm_id),
            player_id: ActiveValue::Set(param.player_id),
            player_name: ActiveValue::Set(param.player_name),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            item: ActiveValue::Set(param.item),
            quantity: ActiveValue::Set(param.quantity),
            unit_price: ActiveValue::Set(param.unit_price),
            status: ActiveValue::Set(ReceiptStatus::Pending.as_str().to_string()),
            verified_quantity: ActiveValue::Set(None),
            verification_note: ActiveValue::Set(None),
            matched_message_ids: ActiveValue::Set(None),
            submitted_at: ActiveValue::Set(param.submitted_at),
            verified_at: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Receipt::from_entity(entity)
    }

    /// Finds a receipt by ID
    ///
    /// # Returns
    /// - `Ok(Some(Receipt))` - The receipt if found
    /// - `Ok(None)` - No receipt with this ID exists
    /// - `Err(AppError)` - Database or conversion error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Receipt>, AppError> {
        entity::prelude::Receipt::find_by_id(id)
            .one(self.db)
            .await?
            .map(Receipt::from_entity)
            .transpose()
    }

    /// Lists receipts newest first, optionally filtered by status
    pub async fn list(&self, status: Option<ReceiptStatus>) -> Result<Vec<Receipt>, AppError> {
        let mut query = entity::prelude::Receipt::find();

        if let Some(status) = status {
            query = query.filter(entity::receipt::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_desc(entity::receipt::Column::SubmittedAt)
            .order_by_desc(entity::receipt::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Receipt::from_entity)
            .collect()
    }

    /// Lists pending receipts submitted at or after `since`, oldest first
    pub async fn list_pending_since(&self, since: DateTime<Utc>) -> Result<Vec<Receipt>, AppError> {
        entity::prelude::Receipt::find()
            .filter(entity::receipt::Column::Status.eq(ReceiptStatus::Pending.as_str()))
            .filter(entity::receipt::Column::SubmittedAt.gte(since))
            .order_by_asc(entity::receipt::Column::SubmittedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Receipt::from_entity)
            .collect()
    }

    /// Records the outcome of a verification attempt
    ///
    /// A successful outcome moves the receipt to `verified` and stores the matched
    /// quantity and messages; an unsuccessful one only updates the note and the
    /// receipt stays `pending`.
    ///
    /// # Returns
    /// - `Ok(Some(Receipt))` - The updated receipt
    /// - `Ok(None)` - No receipt with this ID exists
    /// - `Err(AppError)` - Database or encoding error
    pub async fn record_verification(
        &self,
        id: i32,
        outcome: &VerificationOutcome,
    ) -> Result<Option<Receipt>, AppError> {
        let Some(existing) = entity::prelude::Receipt::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::receipt::ActiveModel = existing.into();
        active.verification_note = ActiveValue::Set(outcome.reason.clone());

        if outcome.verified {
            active.status = ActiveValue::Set(ReceiptStatus::Verified.as_str().to_string());
            active.verified_quantity =
                ActiveValue::Set(Some(outcome.matched_quantity.min(i32::MAX as i64) as i32));
            active.matched_message_ids =
                ActiveValue::Set(Some(serde_json::to_string(&outcome.matched_message_ids)?));
            active.verified_at = ActiveValue::Set(Some(Utc::now()));
        }

        let entity = active.update(self.db).await?;

        Receipt::from_entity(entity).map(Some)
    }

    /// Moves a receipt to a new status with an optional note
    ///
    /// Sets `paid_at` when moving to `paid`.
    ///
    /// # Returns
    /// - `Ok(Some(Receipt))` - The updated receipt
    /// - `Ok(None)` - No receipt with this ID exists
    /// - `Err(AppError)` - Database error
    pub async fn set_status(
        &self,
        id: i32,
        status: ReceiptStatus,
        note: Option<String>,
    ) -> Result<Option<Receipt>, AppError> {
        let Some(existing) = entity::prelude::Receipt::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::receipt::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if note.is_some() {
            active.verification_note = ActiveValue::Set(note);
        }
        if status == ReceiptStatus::Paid {
            active.paid_at = ActiveValue::Set(Some(Utc::now()));
        }

        let entity = active.update(self.db).await?;

        Receipt::from_entity(entity).map(Some)
    }
}
