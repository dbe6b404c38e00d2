//! Firm configuration: validated CRUD, role based visibility, seeding and
//! endpoint connectivity checks.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::DatabaseConnection;
use std::{path::Path, time::Instant};

use crate::{
    model::firm::{CreateFirmDto, TestEndpointResultDto},
    server::{
        data::firm::FirmRepository,
        error::AppError,
        model::firm::{CreateFirmParam, Firm, UpdateFirmParam},
    },
};

static FIRM_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// Source reported in the connectivity test payload
const TEST_SOURCE: &str = "blackgolden";

pub struct FirmConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FirmConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new firm
    ///
    /// # Returns
    /// - `Ok(Firm)` - The created firm
    /// - `Err(AppError::BadRequest)` - Invalid fields, duplicate ID or channel already in use
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateFirmParam) -> Result<Firm, AppError> {
        if !FIRM_ID.is_match(&param.id) {
            return Err(AppError::BadRequest(
                "Firm ID must only contain lowercase letters, digits, '-' and '_'".to_string(),
            ));
        }
        validate_fields(&param.name, &param.channel_id, param.endpoint_url.as_deref())?;

        let repo = FirmRepository::new(self.db);

        if repo.find_by_id(&param.id).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "Firm '{}' already exists",
                param.id
            )));
        }
        if repo.channel_in_use(&param.channel_id, None).await? {
            return Err(AppError::BadRequest(format!(
                "Channel {} is already configured for another firm",
                param.channel_id
            )));
        }

        let firm = repo.create(param).await?;

        tracing::info!("Created firm {} for channel {}", firm.id, firm.channel_id);

        Ok(firm)
    }

    pub async fn get_all(&self) -> Result<Vec<Firm>, AppError> {
        Ok(FirmRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Firm>, AppError> {
        Ok(FirmRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn find_by_channel(&self, channel_id: &str) -> Result<Option<Firm>, AppError> {
        Ok(FirmRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await?)
    }

    /// Replaces every editable field of a firm
    ///
    /// # Returns
    /// - `Ok(Firm)` - The updated firm
    /// - `Err(AppError::NotFound)` - No firm with this ID exists
    /// - `Err(AppError::BadRequest)` - Invalid fields or channel already in use
    pub async fn update(&self, id: &str, param: UpdateFirmParam) -> Result<Firm, AppError> {
        validate_fields(&param.name, &param.channel_id, param.endpoint_url.as_deref())?;

        let repo = FirmRepository::new(self.db);

        if repo.channel_in_use(&param.channel_id, Some(id)).await? {
            return Err(AppError::BadRequest(format!(
                "Channel {} is already configured for another firm",
                param.channel_id
            )));
        }

        let firm = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Firm '{}' not found", id)))?;

        tracing::info!("Updated firm {}", firm.id);

        Ok(firm)
    }

    /// Deletes a firm and its access roles
    ///
    /// # Returns
    /// - `Ok(())` - The firm was deleted
    /// - `Err(AppError::NotFound)` - No firm with this ID exists
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let deleted = FirmRepository::new(self.db).delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("Firm '{}' not found", id)));
        }

        tracing::info!("Deleted firm {}", id);

        Ok(())
    }

    /// Gets the firms visible to a member with the given Discord roles
    ///
    /// Members holding any of `admin_role_ids` see every firm including disabled ones;
    /// everyone else sees enabled firms that are public or share a role with them.
    pub async fn accessible(
        &self,
        roles: &[String],
        admin_role_ids: &[String],
    ) -> Result<Vec<Firm>, AppError> {
        let firms = FirmRepository::new(self.db).get_all().await?;

        if roles.iter().any(|r| admin_role_ids.contains(r)) {
            return Ok(firms);
        }

        Ok(firms
            .into_iter()
            .filter(|f| f.enabled && f.is_visible_to(roles))
            .collect())
    }

    /// Imports firm definitions from a JSON file when no firm exists yet
    ///
    /// The file holds a JSON array of firm definitions in the create request format.
    /// Invalid entries are logged and skipped.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of imported firms, zero when firms already exist
    /// - `Err(AppError::IoErr)` - The file could not be read
    /// - `Err(AppError::JsonErr)` - The file is not a JSON array of firms
    pub async fn seed_from_file(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        if FirmRepository::new(self.db).count().await? > 0 {
            return Ok(0);
        }

        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let definitions: Vec<CreateFirmDto> = serde_json::from_str(&raw)?;

        let mut imported = 0;
        for definition in definitions {
            let id = definition.id.clone();
            match self.create(CreateFirmParam::from(definition)).await {
                Ok(_) => imported += 1,
                Err(e) => tracing::warn!("Skipping seeded firm '{}': {}", id, e),
            }
        }

        Ok(imported)
    }
}

/// POSTs a test event to an endpoint and reports how it answered
///
/// Connection failures and non-2xx responses are reported in the result.
///
/// # Returns
/// - `Ok(TestEndpointResultDto)` - Outcome of the request
/// - `Err(AppError::BadRequest)` - The URL is not an http(s) URL
pub async fn test_endpoint(
    http_client: &reqwest::Client,
    url: &str,
) -> Result<TestEndpointResultDto, AppError> {
    validate_endpoint_url(url)?;

    let payload = serde_json::json!({
        "type": "test",
        "source": TEST_SOURCE,
        "timestamp": Utc::now(),
    });

    let started = Instant::now();
    let result = http_client.post(url).json(&payload).send().await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    Ok(match result {
        Ok(response) => {
            let status = response.status();
            TestEndpointResultDto {
                success: status.is_success(),
                status: Some(status.as_u16()),
                response_time_ms,
                error: (!status.is_success())
                    .then(|| format!("Endpoint responded with {}", status)),
            }
        }
        Err(e) => TestEndpointResultDto {
            success: false,
            status: None,
            response_time_ms,
            error: Some(e.to_string()),
        },
    })
}

fn validate_fields(name: &str, channel_id: &str, endpoint_url: Option<&str>) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::BadRequest("Firm name is required".to_string()));
    }
    if channel_id.is_empty() || !channel_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Channel ID must be a Discord snowflake".to_string(),
        ));
    }
    if let Some(url) = endpoint_url {
        validate_endpoint_url(url)?;
    }

    Ok(())
}

fn validate_endpoint_url(url: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| AppError::BadRequest(format!("Invalid endpoint URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::BadRequest(format!(
            "Endpoint URL must use http or https, got {}",
            scheme
        ))),
    }
}
