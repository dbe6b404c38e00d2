use serde_json::json;

use super::*;

fn firm_body(id: &str, channel_id: &str) -> Value {
    json!({
        "id": id,
        "name": "Fazenda Norte",
        "channelId": channel_id,
        "accessRoles": ["10"]
    })
}

#[tokio::test]
async fn manages_firm_lifecycle() {
    let (app, _test) = app().await;

    let created = send(
        &app,
        json_request(Method::POST, "/api/firms", firm_body("fazenda-norte", "111")),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let firm = body_json(created).await;
    assert_eq!(firm["id"], "fazenda-norte");
    assert_eq!(firm["enabled"], true);
    assert_eq!(firm["accessRoles"], json!(["10"]));

    let by_channel = send(&app, empty_request(Method::GET, "/api/firms/channel/111")).await;
    assert_eq!(by_channel.status(), StatusCode::OK);
    assert_eq!(body_json(by_channel).await["id"], "fazenda-norte");

    let updated = send(
        &app,
        json_request(
            Method::PUT,
            "/api/firms/fazenda-norte",
            json!({"name": "Fazenda Norte II", "channelId": "111", "enabled": false}),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let firm = body_json(updated).await;
    assert_eq!(firm["name"], "Fazenda Norte II");
    assert_eq!(firm["accessRoles"], json!([]));

    let deleted = send(&app, empty_request(Method::DELETE, "/api/firms/fazenda-norte")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = send(&app, empty_request(Method::GET, "/api/firms/fazenda-norte")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_duplicate_and_invalid_firms() {
    let (app, _test) = app().await;

    send(
        &app,
        json_request(Method::POST, "/api/firms", firm_body("fazenda-norte", "111")),
    )
    .await;

    let duplicate = send(
        &app,
        json_request(Method::POST, "/api/firms", firm_body("fazenda-norte", "222")),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(duplicate).await["error"],
        "Firm 'fazenda-norte' already exists"
    );

    let invalid = send(
        &app,
        json_request(Method::POST, "/api/firms", firm_body("Fazenda Norte", "333")),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lists_accessible_firms_for_roles() {
    let (app, _test) = app_with(Config {
        admin_role_ids: vec!["99".to_string()],
        ..Default::default()
    })
    .await;

    send(
        &app,
        json_request(Method::POST, "/api/firms", firm_body("fazenda-norte", "111")),
    )
    .await;

    let member = send(
        &app,
        json_request(Method::POST, "/api/firms/accessible", json!({"roles": ["5"]})),
    )
    .await;
    assert_eq!(member.status(), StatusCode::OK);
    assert_eq!(body_json(member).await, json!([]));

    let admin = send(
        &app,
        json_request(Method::POST, "/api/firms/accessible", json!({"roles": ["99"]})),
    )
    .await;
    assert_eq!(body_json(admin).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_endpoint_rejects_invalid_url() {
    let (app, _test) = app().await;

    let response = send(
        &app,
        json_request(Method::POST, "/api/firms/test-endpoint", json!({"url": "nope"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
