use httpmock::prelude::*;

use crate::server::service::status::StatusService;

#[tokio::test]
async fn reports_online_server_with_players() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/info.json");
            then.status(200).json_body(serde_json::json!({
                "vars": {
                    "sv_projectName": "Black Golden RP",
                    "sv_hostname": "bg-01",
                    "sv_maxClients": "64"
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/players.json");
            then.status(200).json_body(serde_json::json!([
                {"id": 1, "name": "João", "ping": 40},
                {"id": 2, "name": "Maria", "ping": 55}
            ]));
        })
        .await;

    let http_client = reqwest::Client::new();
    let base_url = server.base_url();
    let status = StatusService::new(&http_client, Some(&base_url))
        .status()
        .await;

    assert!(status.online);
    assert_eq!(status.hostname.as_deref(), Some("Black Golden RP"));
    assert_eq!(status.player_count, 2);
    assert_eq!(status.max_players, Some(64));
    assert_eq!(status.players[1].name, "Maria");
}

#[tokio::test]
async fn reports_offline_on_error_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/info.json");
            then.status(500);
        })
        .await;

    let http_client = reqwest::Client::new();
    let base_url = server.base_url();
    let status = StatusService::new(&http_client, Some(&base_url))
        .status()
        .await;

    assert!(!status.online);
    assert_eq!(status.player_count, 0);
    assert!(status.players.is_empty());
}

#[tokio::test]
async fn reports_offline_without_server_url() {
    let http_client = reqwest::Client::new();

    let status = StatusService::new(&http_client, None).status().await;

    assert!(!status.online);
    assert_eq!(status.hostname, None);
}
