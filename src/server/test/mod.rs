use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::server::{
    config::Config, controller::webhook::WEBHOOK_SECRET_HEADER, router::router,
    service::notification::NotificationHub, state::AppState,
};

mod firm;

const SECRET: &str = "segredo";

async fn app_with(config: Config) -> (Router, test_utils::context::TestContext) {
    let test = test_utils::builder::TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();

    let state = AppState::new(
        test.db.clone().unwrap(),
        reqwest::Client::new(),
        NotificationHub::new(),
        config,
    );

    (router().with_state(state), test)
}

async fn app() -> (Router, test_utils::context::TestContext) {
    app_with(Config {
        webhook_secret: Some(SECRET.to_string()),
        ..Default::default()
    })
    .await
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_secret(mut request: Request<Body>, secret: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(WEBHOOK_SECRET_HEADER, secret.parse().unwrap());
    request
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn serves_openapi_document() {
    let (app, _test) = app().await;

    let response = send(&app, empty_request(Method::GET, "/api/openapi.json")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/receipts/{id}/verify"].is_object());
    assert!(doc["paths"]["/api/webhook/channel-messages"].is_object());
}

#[tokio::test]
async fn reports_offline_status_without_server_url() {
    let (app, _test) = app().await;

    let response = send(&app, empty_request(Method::GET, "/api/server/status")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["online"], false);
    assert_eq!(status["playerCount"], 0);
}
