use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        firm::{
            AccessibleFirmsRequestDto, CreateFirmDto, FirmDto, TestEndpointRequestDto,
            TestEndpointResultDto, UpdateFirmDto,
        },
    },
    server::{
        error::AppError,
        model::firm::{CreateFirmParam, Firm, UpdateFirmParam},
        service::firm::{self, FirmConfigService},
        state::AppState,
    },
};

/// Tag for grouping firm endpoints in OpenAPI documentation
pub static FIRM_TAG: &str = "firm";

/// Get all firms.
///
/// Returns every configured firm ordered by name, including disabled ones.
///
/// # Returns
/// - `200 OK` - List of firms
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/firms",
    tag = FIRM_TAG,
    responses(
        (status = 200, description = "All firms", body = Vec<FirmDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_firms(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let firms = FirmConfigService::new(&state.db).get_all().await?;

    Ok(Json(firms.into_iter().map(Firm::into_dto).collect::<Vec<_>>()))
}

/// Create a new firm.
///
/// # Returns
/// - `201 Created` - Successfully created firm
/// - `400 Bad Request` - Invalid firm data, duplicate ID or channel already in use
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/firms",
    tag = FIRM_TAG,
    request_body = CreateFirmDto,
    responses(
        (status = 201, description = "Successfully created firm", body = FirmDto),
        (status = 400, description = "Invalid firm data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_firm(
    State(state): State<AppState>,
    Json(payload): Json<CreateFirmDto>,
) -> Result<impl IntoResponse, AppError> {
    let firm = FirmConfigService::new(&state.db)
        .create(CreateFirmParam::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(firm.into_dto())))
}

/// Get a firm by ID.
///
/// # Returns
/// - `200 OK` - The firm
/// - `404 Not Found` - No firm with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/firms/{id}",
    tag = FIRM_TAG,
    params(
        ("id" = String, Path, description = "Firm ID")
    ),
    responses(
        (status = 200, description = "The firm", body = FirmDto),
        (status = 404, description = "Firm not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_firm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let firm = FirmConfigService::new(&state.db)
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Firm '{}' not found", id)))?;

    Ok(Json(firm.into_dto()))
}

/// Update a firm.
///
/// Replaces every editable field including the access role list.
///
/// # Returns
/// - `200 OK` - The updated firm
/// - `400 Bad Request` - Invalid firm data or channel already in use
/// - `404 Not Found` - No firm with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/firms/{id}",
    tag = FIRM_TAG,
    params(
        ("id" = String, Path, description = "Firm ID")
    ),
    request_body = UpdateFirmDto,
    responses(
        (status = 200, description = "Successfully updated firm", body = FirmDto),
        (status = 400, description = "Invalid firm data", body = ErrorDto),
        (status = 404, description = "Firm not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_firm(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFirmDto>,
) -> Result<impl IntoResponse, AppError> {
    let firm = FirmConfigService::new(&state.db)
        .update(&id, UpdateFirmParam::from(payload))
        .await?;

    Ok(Json(firm.into_dto()))
}

/// Delete a firm.
///
/// # Returns
/// - `204 No Content` - Firm deleted
/// - `404 Not Found` - No firm with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/firms/{id}",
    tag = FIRM_TAG,
    params(
        ("id" = String, Path, description = "Firm ID")
    ),
    responses(
        (status = 204, description = "Firm deleted"),
        (status = 404, description = "Firm not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_firm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    FirmConfigService::new(&state.db).delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the firm configured for a Discord channel.
///
/// # Returns
/// - `200 OK` - The firm bound to the channel
/// - `404 Not Found` - No firm uses this channel
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/firms/channel/{channel_id}",
    tag = FIRM_TAG,
    params(
        ("channel_id" = String, Path, description = "Discord channel ID")
    ),
    responses(
        (status = 200, description = "The firm for the channel", body = FirmDto),
        (status = 404, description = "No firm for this channel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_firm_by_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let firm = FirmConfigService::new(&state.db)
        .find_by_channel(&channel_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No firm configured for channel {}", channel_id))
        })?;

    Ok(Json(firm.into_dto()))
}

/// Get the firms visible to a set of Discord roles.
///
/// Members holding an admin role see every firm. Others see enabled firms that are
/// public or list one of their roles.
///
/// # Returns
/// - `200 OK` - Visible firms
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/firms/accessible",
    tag = FIRM_TAG,
    request_body = AccessibleFirmsRequestDto,
    responses(
        (status = 200, description = "Firms visible to the roles", body = Vec<FirmDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_accessible_firms(
    State(state): State<AppState>,
    Json(payload): Json<AccessibleFirmsRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let firms = FirmConfigService::new(&state.db)
        .accessible(&payload.roles, &state.config.admin_role_ids)
        .await?;

    Ok(Json(firms.into_iter().map(Firm::into_dto).collect::<Vec<_>>()))
}

/// Test connectivity to a firm endpoint.
///
/// Sends a test event to the URL. Connection failures and error responses are
/// reported in the body with `success: false`.
///
/// # Returns
/// - `200 OK` - Outcome of the test request
/// - `400 Bad Request` - Not an http(s) URL
#[utoipa::path(
    post,
    path = "/api/firms/test-endpoint",
    tag = FIRM_TAG,
    request_body = TestEndpointRequestDto,
    responses(
        (status = 200, description = "Outcome of the test request", body = TestEndpointResultDto),
        (status = 400, description = "Invalid URL", body = ErrorDto)
    ),
)]
pub async fn test_firm_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<TestEndpointRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let result = firm::test_endpoint(&state.http_client, payload.url.trim()).await?;

    Ok(Json(result))
}
