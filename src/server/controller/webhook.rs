use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        message::{ChannelMessagesDto, ChannelMessagesRequestDto, IngestResponseDto},
    },
    server::{
        error::{webhook::WebhookError, AppError},
        model::message::IncomingMessage,
        service::message::{process_incoming, MessageService},
        state::AppState,
    },
};

/// Tag for grouping webhook endpoints in OpenAPI documentation
pub static WEBHOOK_TAG: &str = "webhook";

/// Header carrying the shared webhook secret
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

const DEFAULT_MESSAGE_LIMIT: u64 = 50;
const MAX_MESSAGE_LIMIT: u64 = 500;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ChannelMessagesParams {
    /// Only return messages from this channel
    pub channel_id: Option<String>,
    /// Maximum number of messages, capped at 500
    pub limit: Option<u64>,
}

/// Receive channel messages from the Discord bot.
///
/// Stores the new messages of a batch, skipping messages already seen by ID or by
/// content. When anything new was stored, SSE clients receive a `new_messages`
/// event and the new messages are forwarded to the channel's firm in the background.
///
/// # Access Control
/// - When `WEBHOOK_SECRET` is configured the request must carry it in the
///   `x-webhook-secret` header
///
/// # Returns
/// - `200 OK` - Counts of received, stored and duplicate messages
/// - `400 Bad Request` - Empty channel ID
/// - `401 Unauthorized` - Missing or invalid webhook secret
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/webhook/channel-messages",
    tag = WEBHOOK_TAG,
    request_body = ChannelMessagesRequestDto,
    responses(
        (status = 200, description = "Messages ingested", body = IngestResponseDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Missing or invalid webhook secret", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn receive_channel_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChannelMessagesRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    verify_secret(state.config.webhook_secret.as_deref(), &headers)?;

    let channel_id = payload.channel_id.trim().to_string();
    if channel_id.is_empty() {
        return Err(AppError::BadRequest("channelId is required".to_string()));
    }

    let messages: Vec<IncomingMessage> = payload
        .messages
        .into_iter()
        .map(IncomingMessage::from_dto)
        .collect();

    let summary = process_incoming(&state, &channel_id, messages).await?;

    Ok(Json(IngestResponseDto {
        success: true,
        received: summary.received,
        stored: summary.stored.len() as u64,
        duplicates: summary.duplicates,
    }))
}

/// Get recently stored channel messages.
///
/// Returns the newest messages first, each annotated with the activity parser's
/// result (`parseSuccess`, `tipo`, `categoria`, `displayText`, `parsed`).
///
/// # Returns
/// - `200 OK` - Messages and the total number stored for the filter
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/webhook/channel-messages",
    tag = WEBHOOK_TAG,
    params(ChannelMessagesParams),
    responses(
        (status = 200, description = "Stored channel messages", body = ChannelMessagesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channel_messages(
    State(state): State<AppState>,
    Query(params): Query<ChannelMessagesParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
        .clamp(1, MAX_MESSAGE_LIMIT);
    let channel_id = params
        .channel_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let messages = MessageService::new(&state.db)
        .list(channel_id, limit)
        .await?;

    Ok(Json(messages))
}

/// Subscribe to dashboard events.
///
/// Server-sent event stream. The first event is `{"type":"connected"}`, followed by
/// `heartbeat`, `new_messages` and `receipt_updated` events as they happen.
#[utoipa::path(
    get,
    path = "/api/webhook/sse",
    tag = WEBHOOK_TAG,
    responses(
        (status = 200, description = "Server-sent event stream", body = String, content_type = "text/event-stream")
    ),
)]
pub async fn subscribe_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = state
        .notifier
        .subscribe()
        .map(|event| Event::default().json_data(event));

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Checks the shared secret header when a secret is configured
fn verify_secret(expected: Option<&str>, headers: &HeaderMap) -> Result<(), WebhookError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSecret)?;

    if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(WebhookError::InvalidSecret);
    }

    Ok(())
}
