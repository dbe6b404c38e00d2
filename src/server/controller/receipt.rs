use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        notification::NotificationEventDto,
        receipt::{CreateReceiptDto, ReceiptDto, RejectReceiptDto, VerificationResultDto},
    },
    server::{
        error::AppError, model::receipt::Receipt, service::receipt::ReceiptService,
        state::AppState,
    },
};

/// Tag for grouping receipt endpoints in OpenAPI documentation
pub static RECEIPT_TAG: &str = "receipt";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReceiptListParams {
    /// `pending`, `verified`, `rejected` or `paid`
    pub status: Option<String>,
}

/// List receipts.
///
/// # Returns
/// - `200 OK` - Receipts newest first
/// - `400 Bad Request` - Unknown status filter
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/receipts",
    tag = RECEIPT_TAG,
    params(ReceiptListParams),
    responses(
        (status = 200, description = "Receipts", body = Vec<ReceiptDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_receipts(
    State(state): State<AppState>,
    Query(params): Query<ReceiptListParams>,
) -> Result<impl IntoResponse, AppError> {
    let receipts = ReceiptService::new(&state.db)
        .list(params.status.as_deref())
        .await?;

    Ok(Json(
        receipts
            .into_iter()
            .map(Receipt::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// Submit a receipt.
///
/// # Returns
/// - `201 Created` - The pending receipt
/// - `400 Bad Request` - Invalid receipt data or unknown firm
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/receipts",
    tag = RECEIPT_TAG,
    request_body = CreateReceiptDto,
    responses(
        (status = 201, description = "Receipt created", body = ReceiptDto),
        (status = 400, description = "Invalid receipt data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_receipt(
    State(state): State<AppState>,
    Json(payload): Json<CreateReceiptDto>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = ReceiptService::new(&state.db).create(payload).await?;

    Ok((StatusCode::CREATED, Json(receipt.into_dto())))
}

/// Get a receipt by ID.
#[utoipa::path(
    get,
    path = "/api/receipts/{id}",
    tag = RECEIPT_TAG,
    params(
        ("id" = i32, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "The receipt", body = ReceiptDto),
        (status = 404, description = "Receipt not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = ReceiptService::new(&state.db).get(id).await?;

    Ok(Json(receipt.into_dto()))
}

/// Verify a pending receipt against channel messages.
///
/// Looks for deposits by the receipt's member of the receipt's item within five
/// minutes of its submission. The receipt becomes `verified` when they add up to
/// the claimed quantity, otherwise it stays `pending` with a note.
///
/// # Returns
/// - `200 OK` - Verification result and the updated receipt
/// - `400 Bad Request` - Receipt is not pending
/// - `404 Not Found` - Receipt not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/receipts/{id}/verify",
    tag = RECEIPT_TAG,
    params(
        ("id" = i32, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "Verification result", body = VerificationResultDto),
        (status = 400, description = "Receipt is not pending", body = ErrorDto),
        (status = 404, description = "Receipt not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_receipt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (receipt, outcome) = ReceiptService::new(&state.db).verify(id).await?;

    if outcome.verified {
        notify_receipt_updated(&state, &receipt);
    }

    Ok(Json(VerificationResultDto {
        receipt: receipt.into_dto(),
        verified: outcome.verified,
        matched_quantity: outcome.matched_quantity,
        expected_quantity: outcome.expected_quantity,
        matched_message_ids: outcome.matched_message_ids,
        reason: outcome.reason,
    }))
}

/// Reject a receipt.
///
/// # Returns
/// - `200 OK` - The rejected receipt
/// - `400 Bad Request` - Receipt already rejected or paid
/// - `404 Not Found` - Receipt not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/receipts/{id}/reject",
    tag = RECEIPT_TAG,
    params(
        ("id" = i32, Path, description = "Receipt ID")
    ),
    request_body = RejectReceiptDto,
    responses(
        (status = 200, description = "Receipt rejected", body = ReceiptDto),
        (status = 400, description = "Receipt cannot be rejected", body = ErrorDto),
        (status = 404, description = "Receipt not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_receipt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Option<Json<RejectReceiptDto>>,
) -> Result<impl IntoResponse, AppError> {
    let note = payload.and_then(|Json(p)| p.note);

    let receipt = ReceiptService::new(&state.db).reject(id, note).await?;
    notify_receipt_updated(&state, &receipt);

    Ok(Json(receipt.into_dto()))
}

/// Mark a verified receipt as paid.
///
/// # Returns
/// - `200 OK` - The paid receipt
/// - `400 Bad Request` - Receipt is not verified
/// - `404 Not Found` - Receipt not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/receipts/{id}/pay",
    tag = RECEIPT_TAG,
    params(
        ("id" = i32, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "Receipt paid", body = ReceiptDto),
        (status = 400, description = "Receipt is not verified", body = ErrorDto),
        (status = 404, description = "Receipt not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pay_receipt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = ReceiptService::new(&state.db).pay(id).await?;
    notify_receipt_updated(&state, &receipt);

    Ok(Json(receipt.into_dto()))
}

fn notify_receipt_updated(state: &AppState, receipt: &Receipt) {
    state.notifier.notify(NotificationEventDto::ReceiptUpdated {
        receipt_id: receipt.id,
        status: receipt.status.as_str().to_string(),
    });
}
