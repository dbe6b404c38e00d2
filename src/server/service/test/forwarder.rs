use chrono::Utc;
use httpmock::prelude::*;
use test_utils::{builder::TestBuilder, factory::firm::FirmFactory};

use super::{base_time, incoming};
use crate::server::{
    error::AppError,
    model::{
        firm::Firm,
        forward::ForwardOutcome,
        message::MessageEmbed,
    },
    service::forwarder::{build_payload, MultiChannelForwarder, FIRM_ID_HEADER},
};

const DEPOSIT: &str = "[ID]: 123 João Silva\n[DEPOSITOU]: 10x Milho";

fn firm() -> Firm {
    Firm {
        id: "fazenda-norte".to_string(),
        name: "Fazenda Norte".to_string(),
        description: None,
        channel_id: "111".to_string(),
        endpoint_url: None,
        enabled: true,
        access_roles: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Tests forwarding from a channel without a firm.
///
/// Expected: NoFirm
#[tokio::test]
async fn skips_channel_without_firm() -> Result<(), AppError> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();

    let outcome = MultiChannelForwarder::new(db, &http_client)
        .process_message(&incoming("1", "42", DEPOSIT, base_time()), "111")
        .await;

    assert_eq!(outcome, ForwardOutcome::NoFirm);

    Ok(())
}

/// Tests forwarding for disabled firms and firms without an endpoint.
///
/// Expected: Disabled and NoEndpoint
#[tokio::test]
async fn skips_disabled_firm_and_missing_endpoint() -> Result<(), AppError> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();

    FirmFactory::new(db)
        .channel_id("111")
        .endpoint_url(Some("http://127.0.0.1:1/hook"))
        .enabled(false)
        .build()
        .await?;
    FirmFactory::new(db).channel_id("222").build().await?;

    let forwarder = MultiChannelForwarder::new(db, &http_client);
    let message = incoming("1", "42", DEPOSIT, base_time());

    assert_eq!(
        forwarder.process_message(&message, "111").await,
        ForwardOutcome::Disabled
    );
    assert_eq!(
        forwarder.process_message(&message, "222").await,
        ForwardOutcome::NoEndpoint
    );

    Ok(())
}

/// Tests forwarding to an endpoint that accepts the payload.
///
/// Expected: Forwarded with the firm header and the parsed activity in the body
#[tokio::test]
async fn forwards_payload_with_firm_header() -> Result<(), AppError> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/hook")
                .header(FIRM_ID_HEADER, "fazenda-norte")
                .json_body_partial(
                    r#"{
                        "firmId": "fazenda-norte",
                        "channelId": "111",
                        "messageId": "1",
                        "parsed": {"tipo": "deposito", "quantidade": 10}
                    }"#,
                );
            then.status(200);
        })
        .await;

    FirmFactory::new(db)
        .id("fazenda-norte")
        .channel_id("111")
        .endpoint_url(Some(server.url("/hook").as_str()))
        .build()
        .await?;

    let outcome = MultiChannelForwarder::new(db, &http_client)
        .process_message(&incoming("1", "42", DEPOSIT, base_time()), "111")
        .await;

    mock.assert_async().await;
    assert_eq!(outcome, ForwardOutcome::Forwarded { status: 200 });

    Ok(())
}

/// Tests forwarding to an endpoint that answers with an error.
///
/// Expected: Failed with the response status
#[tokio::test]
async fn reports_endpoint_error_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hook");
            then.status(503);
        })
        .await;

    FirmFactory::new(db)
        .channel_id("111")
        .endpoint_url(Some(server.url("/hook").as_str()))
        .build()
        .await?;

    let outcome = MultiChannelForwarder::new(db, &http_client)
        .process_message(&incoming("1", "42", DEPOSIT, base_time()), "111")
        .await;

    assert!(matches!(
        outcome,
        ForwardOutcome::Failed {
            status: Some(503),
            ..
        }
    ));

    Ok(())
}

/// Tests forwarding to an endpoint that cannot be reached.
///
/// Expected: Failed without a status
#[tokio::test]
async fn reports_unreachable_endpoint() -> Result<(), AppError> {
    let test = TestBuilder::new().with_firm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();

    FirmFactory::new(db)
        .channel_id("111")
        .endpoint_url(Some("http://127.0.0.1:1/hook"))
        .build()
        .await?;

    let outcome = MultiChannelForwarder::new(db, &http_client)
        .process_message(&incoming("1", "42", DEPOSIT, base_time()), "111")
        .await;

    assert!(matches!(outcome, ForwardOutcome::Failed { status: None, .. }));

    Ok(())
}

#[test]
fn payload_prefers_embed_author_and_description() {
    let mut message = incoming("1", "42", "", base_time());
    message.embeds.push(MessageEmbed {
        title: Some("Depósito".to_string()),
        description: Some("Baú da fazenda atualizado".to_string()),
        author_name: Some("João Silva".to_string()),
        ..Default::default()
    });

    let payload = build_payload(&firm(), &message, "111");

    assert_eq!(payload.firm_id, "fazenda-norte");
    assert_eq!(payload.firm_name, "Fazenda Norte");
    assert_eq!(payload.author.id, "42");
    assert_eq!(payload.author.name, "João Silva");
    assert_eq!(payload.content, "Baú da fazenda atualizado");
}

#[test]
fn payload_uses_message_author_and_content() {
    let message = incoming("1", "42", DEPOSIT, base_time());

    let payload = build_payload(&firm(), &message, "111");

    assert_eq!(payload.author.name, "Farm Logger");
    assert_eq!(payload.content, DEPOSIT);
    assert_eq!(payload.timestamp, base_time());
    assert_eq!(payload.parsed.map(|p| p.quantidade), Some(10));
}
