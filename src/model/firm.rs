use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirmDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub endpoint_url: Option<String>,
    pub enabled: bool,
    pub access_roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Firm definition accepted by the create endpoint and by the seed file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFirmDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub channel_id: String,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub access_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFirmDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub channel_id: String,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub access_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessibleFirmsRequestDto {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestEndpointRequestDto {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestEndpointResultDto {
    pub success: bool,
    pub status: Option<u16>,
    pub response_time_ms: u64,
    pub error: Option<String>,
}

fn default_enabled() -> bool {
    true
}
