//! Domain & parameter models for firm configuration
//!
//! A firm is a tenant of the dashboard: an in-game company bound to one Discord
//! channel, optionally forwarding that channel's messages to an HTTP endpoint,
//! and visible to the Discord roles in its access list.

use chrono::{DateTime, Utc};

use crate::model::firm::{CreateFirmDto, FirmDto, UpdateFirmDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Firm {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub endpoint_url: Option<String>,
    pub enabled: bool,
    /// Discord role IDs allowed to view the firm; empty means visible to everyone
    pub access_roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Firm {
    /// Converts an entity model and its access roles into the firm domain model
    ///
    /// # Arguments
    /// - `entity` - The firm entity model from the database
    /// - `roles` - Access role rows belonging to the firm
    ///
    /// # Returns
    /// - `Firm` - The converted domain model
    pub fn from_entity(
        entity: entity::firm::Model,
        roles: Vec<entity::firm_access_role::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            channel_id: entity.channel_id,
            endpoint_url: entity.endpoint_url,
            enabled: entity.enabled,
            access_roles: roles.into_iter().map(|r| r.role_id).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether any of the provided roles grants access to this firm
    pub fn is_visible_to(&self, roles: &[String]) -> bool {
        self.access_roles.is_empty() || self.access_roles.iter().any(|r| roles.contains(r))
    }

    pub fn into_dto(self) -> FirmDto {
        FirmDto {
            id: self.id,
            name: self.name,
            description: self.description,
            channel_id: self.channel_id,
            endpoint_url: self.endpoint_url,
            enabled: self.enabled,
            access_roles: self.access_roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating a new firm
#[derive(Debug, Clone)]
pub struct CreateFirmParam {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub endpoint_url: Option<String>,
    pub enabled: bool,
    pub access_roles: Vec<String>,
}

impl From<CreateFirmDto> for CreateFirmParam {
    fn from(dto: CreateFirmDto) -> Self {
        Self {
            id: dto.id.trim().to_string(),
            name: dto.name.trim().to_string(),
            description: normalize_optional(dto.description),
            channel_id: dto.channel_id.trim().to_string(),
            endpoint_url: normalize_optional(dto.endpoint_url),
            enabled: dto.enabled,
            access_roles: normalize_roles(dto.access_roles),
        }
    }
}

/// Parameters for updating an existing firm; every field is replaced
#[derive(Debug, Clone)]
pub struct UpdateFirmParam {
    pub name: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub endpoint_url: Option<String>,
    pub enabled: bool,
    pub access_roles: Vec<String>,
}

impl From<UpdateFirmDto> for UpdateFirmParam {
    fn from(dto: UpdateFirmDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: normalize_optional(dto.description),
            channel_id: dto.channel_id.trim().to_string(),
            endpoint_url: normalize_optional(dto.endpoint_url),
            enabled: dto.enabled,
            access_roles: normalize_roles(dto.access_roles),
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims role IDs and drops blanks and duplicates while keeping order
fn normalize_roles(roles: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(roles.len());
    for role in roles {
        let role = role.trim().to_string();
        if !role.is_empty() && !normalized.contains(&role) {
            normalized.push(role);
        }
    }
    normalized
}
