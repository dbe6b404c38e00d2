use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum WebhookError {
    /// A webhook secret is configured but the request did not carry one.
    #[error("Webhook request is missing the shared secret header")]
    MissingSecret,

    /// The shared secret carried by the request does not match the configured one.
    #[error("Webhook request carried an invalid shared secret")]
    InvalidSecret,
}

/// Converts webhook authentication errors into HTTP responses.
///
/// Both variants result in 401 Unauthorized with the same client-facing message so
/// callers cannot distinguish a missing secret from a wrong one. The specific
/// reason is logged at warn level.
impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected webhook request: {}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}
