//! Domain & parameter models for farm service receipts
//!
//! A receipt records a member's claim of having delivered animals or deposited
//! plants. It starts `pending` and is verified against the channel messages
//! posted around its submission time before it can be paid.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::{
    model::receipt::{CreateReceiptDto, ReceiptDto},
    server::{
        error::{internal::InternalError, AppError},
        model::activity::ActivityCategory,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    Animal,
    Planta,
}

impl ReceiptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Planta => "planta",
        }
    }

    /// The activity category a matching deposit message must carry
    pub fn category(&self) -> ActivityCategory {
        match self {
            Self::Animal => ActivityCategory::Animais,
            Self::Planta => ActivityCategory::Plantas,
        }
    }
}

impl FromStr for ReceiptKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "animal" | "animais" => Ok(Self::Animal),
            "planta" | "plantas" => Ok(Self::Planta),
            other => Err(format!("Unknown receipt kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Pending,
    Verified,
    Rejected,
    Paid,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for ReceiptStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            "paid" => Ok(Self::Paid),
            other => Err(format!("Unknown receipt status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: i32,
    pub firm_id: Option<String>,
    pub player_id: String,
    pub player_name: String,
    pub kind: ReceiptKind,
    pub item: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub status: ReceiptStatus,
    pub verified_quantity: Option<i32>,
    pub verification_note: Option<String>,
    pub matched_message_ids: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Converts an entity model to the receipt domain model
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Receipt)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - Stored kind/status is unknown or the matched
    ///   message column is not valid JSON
    pub fn from_entity(entity: entity::receipt::Model) -> Result<Self, AppError> {
        let kind = ReceiptKind::from_str(&entity.kind).map_err(|_| {
            InternalError::UnknownStoredValue {
                kind: "receipt kind",
                value: entity.kind.clone(),
            }
        })?;
        let status = ReceiptStatus::from_str(&entity.status).map_err(|_| {
            InternalError::UnknownStoredValue {
                kind: "receipt status",
                value: entity.status.clone(),
            }
        })?;
        let matched_message_ids = match entity.matched_message_ids.as_deref() {
            Some(json) => serde_json::from_str::<Vec<String>>(json).map_err(|e| {
                InternalError::StoredJson {
                    column: "receipt.matched_message_ids",
                    source: e,
                }
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            id: entity.id,
            firm_id: entity.firm_id,
            player_id: entity.player_id,
            player_name: entity.player_name,
            kind,
            item: entity.item,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
            status,
            verified_quantity: entity.verified_quantity,
            verification_note: entity.verification_note,
            matched_message_ids,
            submitted_at: entity.submitted_at,
            verified_at: entity.verified_at,
            paid_at: entity.paid_at,
            created_at: entity.created_at,
        })
    }

    /// Quantity times unit price, saturating for rows stored before creation
    /// bounded the product
    pub fn total_value(&self) -> i64 {
        (self.quantity as i64).saturating_mul(self.unit_price)
    }

    pub fn into_dto(self) -> ReceiptDto {
        let total_value = self.total_value();

        ReceiptDto {
            id: self.id,
            firm_id: self.firm_id,
            player_id: self.player_id,
            player_name: self.player_name,
            kind: self.kind.as_str().to_string(),
            item: self.item,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_value,
            status: self.status.as_str().to_string(),
            verified_quantity: self.verified_quantity,
            verification_note: self.verification_note,
            matched_message_ids: self.matched_message_ids,
            submitted_at: self.submitted_at,
            verified_at: self.verified_at,
            paid_at: self.paid_at,
            created_at: self.created_at,
        }
    }
}

/// Parameters for creating a new receipt
#[derive(Debug, Clone)]
pub struct CreateReceiptParam {
    pub firm_id: Option<String>,
    pub player_id: String,
    pub player_name: String,
    pub kind: ReceiptKind,
    pub item: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub submitted_at: DateTime<Utc>,
}

impl CreateReceiptParam {
    /// Builds creation parameters from the request DTO
    ///
    /// # Returns
    /// - `Ok(CreateReceiptParam)` - Validated parameters
    /// - `Err(AppError::BadRequest)` - Unknown kind, blank player/item, non-positive
    ///   quantity, negative unit price or a total value that does not fit in an `i64`
    pub fn from_dto(dto: CreateReceiptDto) -> Result<Self, AppError> {
        let kind = ReceiptKind::from_str(&dto.kind).map_err(AppError::BadRequest)?;

        let player_id = dto.player_id.trim().to_string();
        let player_name = dto.player_name.trim().to_string();
        let item = dto.item.trim().to_string();

        if player_id.is_empty() || player_name.is_empty() {
            return Err(AppError::BadRequest(
                "Player ID and name are required".to_string(),
            ));
        }
        if item.is_empty() {
            return Err(AppError::BadRequest("Item is required".to_string()));
        }
        if dto.quantity <= 0 {
            return Err(AppError::BadRequest(
                "Quantity must be greater than zero".to_string(),
            ));
        }
        if dto.unit_price < 0 {
            return Err(AppError::BadRequest(
                "Unit price cannot be negative".to_string(),
            ));
        }
        if (dto.quantity as i64).checked_mul(dto.unit_price).is_none() {
            return Err(AppError::BadRequest(
                "Total value is too large".to_string(),
            ));
        }

        Ok(Self {
            firm_id: dto
                .firm_id
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty()),
            player_id,
            player_name,
            kind,
            item,
            quantity: dto.quantity,
            unit_price: dto.unit_price,
            submitted_at: dto.submitted_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Result of reconciling a receipt against channel messages
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub matched_quantity: i64,
    pub expected_quantity: i64,
    pub matched_message_ids: Vec<String>,
    pub reason: Option<String>,
}
