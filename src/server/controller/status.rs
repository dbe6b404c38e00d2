use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    model::status::ServerStatusDto,
    server::{service::status::StatusService, state::AppState},
};

/// Tag for grouping status endpoints in OpenAPI documentation
pub static STATUS_TAG: &str = "status";

/// Get the FiveM game server status.
///
/// Reports the server as offline when no server is configured or it cannot be reached.
#[utoipa::path(
    get,
    path = "/api/server/status",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Game server status", body = ServerStatusDto)
    ),
)]
pub async fn get_server_status(State(state): State<AppState>) -> impl IntoResponse {
    let status = StatusService::new(&state.http_client, state.config.fivem_server_url.as_deref())
        .status()
        .await;

    Json(status)
}
