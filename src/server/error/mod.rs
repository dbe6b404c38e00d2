//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod config;
pub mod internal;
pub mod webhook;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, internal::InternalError, webhook::WebhookError},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. Domain-specific errors like `WebhookError` handle their own response
/// mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always results in 500 Internal Server Error as configuration issues
    /// prevent normal application operation.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Webhook shared secret validation error.
    ///
    /// Delegates to `WebhookError::into_response()` which responds with 401 Unauthorized.
    #[error(transparent)]
    WebhookErr(#[from] WebhookError),

    /// Internal consistency error such as an unparsable stored value.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Results in 500 Internal Server Error when external API calls fail.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Results in 500 Internal Server Error when
    /// Discord bot operations fail.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    ///
    /// Results in 500 Internal Server Error when scheduled job operations fail.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// JSON encoding or decoding error.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Filesystem or socket error, e.g. while reading the firm seed file or binding
    /// the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Webhook errors delegate to their own response handling, while other errors
/// use standard mappings. Internal errors are logged with full details but return
/// generic messages to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 401 Unauthorized - For `WebhookErr`, delegated to `WebhookError::into_response()`
/// - 404 Not Found - For `NotFound` variant
/// - 500 Internal Server Error - For all other error types (DbErr, ReqwestErr, etc.)
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::WebhookErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

/// Converts wrapped errors into 500 Internal Server Error responses.
///
/// Logs the full error message for debugging, but returns a generic error message to the
/// client to avoid exposing internal implementation details or sensitive information.
///
/// # Arguments
/// - `E` - Any type that implements `Display` (typically an error type)
///
/// # Returns
/// A 500 Internal Server Error response with a generic error message JSON body
impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
