use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::{
    model::{
        api::ErrorDto,
        firm::{
            AccessibleFirmsRequestDto, CreateFirmDto, FirmDto, TestEndpointRequestDto,
            TestEndpointResultDto, UpdateFirmDto,
        },
        message::{
            ChannelMessagesDto, ChannelMessagesRequestDto, EmbedAuthorDto, EmbedDto,
            EmbedFieldDto, EmbedFooterDto, IngestResponseDto, MessageAuthorDto, MessageDataDto,
            ParsedActivityDto, StoredAuthorDto, StoredMessageDto,
        },
        receipt::{CreateReceiptDto, ReceiptDto, RejectReceiptDto, VerificationResultDto},
        status::{PlayerDto, ServerStatusDto},
    },
    server::{
        config::Config,
        controller::{
            firm::{self, FIRM_TAG},
            receipt::{self, RECEIPT_TAG},
            status::{self, STATUS_TAG},
            webhook::{self, WEBHOOK_TAG},
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        webhook::receive_channel_messages,
        webhook::get_channel_messages,
        webhook::subscribe_events,
        firm::get_firms,
        firm::create_firm,
        firm::get_firm,
        firm::update_firm,
        firm::delete_firm,
        firm::get_firm_by_channel,
        firm::get_accessible_firms,
        firm::test_firm_endpoint,
        receipt::get_receipts,
        receipt::create_receipt,
        receipt::get_receipt,
        receipt::verify_receipt,
        receipt::reject_receipt,
        receipt::pay_receipt,
        status::get_server_status,
    ),
    components(schemas(
        ErrorDto,
        MessageAuthorDto,
        EmbedFieldDto,
        EmbedAuthorDto,
        EmbedFooterDto,
        EmbedDto,
        MessageDataDto,
        ChannelMessagesRequestDto,
        IngestResponseDto,
        ParsedActivityDto,
        StoredAuthorDto,
        StoredMessageDto,
        ChannelMessagesDto,
        FirmDto,
        CreateFirmDto,
        UpdateFirmDto,
        AccessibleFirmsRequestDto,
        TestEndpointRequestDto,
        TestEndpointResultDto,
        ReceiptDto,
        CreateReceiptDto,
        RejectReceiptDto,
        VerificationResultDto,
        PlayerDto,
        ServerStatusDto,
    )),
    tags(
        (name = WEBHOOK_TAG, description = "Discord channel message ingestion and live events"),
        (name = FIRM_TAG, description = "Firm configuration"),
        (name = RECEIPT_TAG, description = "Farm service receipts"),
        (name = STATUS_TAG, description = "Game server status"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/webhook/channel-messages",
            post(webhook::receive_channel_messages).get(webhook::get_channel_messages),
        )
        .route("/api/webhook/sse", get(webhook::subscribe_events))
        .route("/api/firms", get(firm::get_firms).post(firm::create_firm))
        .route("/api/firms/accessible", post(firm::get_accessible_firms))
        .route("/api/firms/test-endpoint", post(firm::test_firm_endpoint))
        .route(
            "/api/firms/channel/{channel_id}",
            get(firm::get_firm_by_channel),
        )
        .route(
            "/api/firms/{id}",
            get(firm::get_firm)
                .put(firm::update_firm)
                .delete(firm::delete_firm),
        )
        .route(
            "/api/receipts",
            get(receipt::get_receipts).post(receipt::create_receipt),
        )
        .route("/api/receipts/{id}", get(receipt::get_receipt))
        .route("/api/receipts/{id}/verify", post(receipt::verify_receipt))
        .route("/api/receipts/{id}/reject", post(receipt::reject_receipt))
        .route("/api/receipts/{id}/pay", post(receipt::pay_receipt))
        .route("/api/server/status", get(status::get_server_status))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

/// Builds the CORS layer
///
/// Allows `CORS_ALLOWED_ORIGIN` when it is configured and parses as a header value,
/// otherwise any origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match config.cors_allowed_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => layer.allow_origin(origin),
            Err(e) => {
                tracing::error!("Failed to parse CORS origin '{}': {}", origin, e);
                layer.allow_origin(Any)
            }
        },
        None => layer.allow_origin(Any),
    }
}
