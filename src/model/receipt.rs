use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDto {
    pub id: i32,
    pub firm_id: Option<String>,
    pub player_id: String,
    pub player_name: String,
    /// `animal` or `planta`
    pub kind: String,
    pub item: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_value: i64,
    /// `pending`, `verified`, `rejected` or `paid`
    pub status: String,
    pub verified_quantity: Option<i32>,
    pub verification_note: Option<String>,
    pub matched_message_ids: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptDto {
    #[serde(default)]
    pub firm_id: Option<String>,
    pub player_id: String,
    pub player_name: String,
    pub kind: String,
    pub item: String,
    pub quantity: i32,
    #[serde(default)]
    pub unit_price: i64,
    /// Defaults to the time the request is received
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RejectReceiptDto {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResultDto {
    pub receipt: ReceiptDto,
    pub verified: bool,
    pub matched_quantity: i64,
    pub expected_quantity: i64,
    pub matched_message_ids: Vec<String>,
    pub reason: Option<String>,
}
