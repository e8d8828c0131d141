//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → authenticated cursor requests → aggregated JSON

use base64::Engine;
use clap::Parser;
use kintone_sdk::auth::{AuthConfig, PASSWORD_AUTH_HEADER};
use kintone_sdk::cli::{Cli, Runner};
use kintone_sdk::{ClientConfig, CursorQuery, Error};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURSOR_ROUTE: &str = "/k/v1/records/cursor.json";

fn password_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri())
        .with_auth(AuthConfig::password("MY_USERNAME", "MY_PASSWORD"))
}

fn password_header() -> String {
    base64::engine::general_purpose::STANDARD.encode("MY_USERNAME:MY_PASSWORD")
}

fn numbered(n: usize) -> Value {
    json!({"Record_number": {"type": "RECORD_NUMBER", "value": n.to_string()}})
}

// ============================================================================
// Record retrieval
// ============================================================================

#[tokio::test]
async fn test_get_all_records_authenticated() {
    let server = MockServer::start().await;
    let auth = password_header();

    Mock::given(method("POST"))
        .and(path(CURSOR_ROUTE))
        .and(header(PASSWORD_AUTH_HEADER, auth.as_str()))
        .and(body_json(json!({"app": 1, "fields": [], "query": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "123",
            "totalCount": "1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CURSOR_ROUTE))
        .and(query_param("id", "123"))
        .and(header(PASSWORD_AUTH_HEADER, auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [numbered(1)],
            "next": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = password_config(&server).record_client().unwrap();
    let result = client
        .get_all_records_by_cursor(&CursorQuery::new(1))
        .await
        .unwrap();

    assert_eq!(result.records.len() as u64, result.total_count);
}

#[tokio::test]
async fn test_large_result_set_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CURSOR_ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "big",
            "totalCount": 1200
        })))
        .mount(&server)
        .await;

    // 500 + 500 + 200
    for (start, len, next) in [(1, 500, true), (501, 500, true)] {
        let records: Vec<Value> = (start..start + len).map(numbered).collect();
        Mock::given(method("GET"))
            .and(path(CURSOR_ROUTE))
            .and(query_param("id", "big"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": records,
                "next": next
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
    }
    let last: Vec<Value> = (1001..=1200).map(numbered).collect();
    Mock::given(method("GET"))
        .and(path(CURSOR_ROUTE))
        .and(query_param("id", "big"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": last,
            "next": false
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(CURSOR_ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ClientConfig::new(server.uri()).record_client().unwrap();
    let result = client
        .get_all_records_by_cursor(&CursorQuery::new(1).size(500))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1200);
    assert_eq!(result.records[0]["Record_number"]["value"], "1");
    assert_eq!(result.records[1199]["Record_number"]["value"], "1200");
}

#[tokio::test]
async fn test_concurrent_retrievals_are_independent() {
    let server = MockServer::start().await;

    for (app, id) in [(1, "c1"), (2, "c2")] {
        Mock::given(method("POST"))
            .and(path(CURSOR_ROUTE))
            .and(body_json(json!({"app": app, "fields": [], "query": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "totalCount": app
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records: Vec<Value> = (1..=app as usize).map(numbered).collect();
        Mock::given(method("GET"))
            .and(path(CURSOR_ROUTE))
            .and(query_param("id", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": records,
                "next": false
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = Arc::new(ClientConfig::new(server.uri()).record_client().unwrap());
    let first = {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            client
                .get_all_records_by_cursor(&CursorQuery::new(1))
                .await
        })
    };
    let second = {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            client
                .get_all_records_by_cursor(&CursorQuery::new(2))
                .await
        })
    };

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_eq!(first.records.len(), 1);
    assert_eq!(second.records.len(), 2);
}

#[tokio::test]
async fn test_guest_space_cursor_cleanup() {
    let server = MockServer::start().await;
    let route = "/k/guest/3/v1/records/cursor.json";

    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g1",
            "totalCount": "5"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "CB_NO02",
            "message": "No privilege to proceed."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(route))
        .and(body_json(json!({"id": "g1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(server.uri());
    config.guest_space_id = Some(3);
    let client = config.record_client().unwrap();
    let err = client
        .get_all_records_by_cursor(&CursorQuery::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 403, .. }));
    assert_eq!(err.to_string(), "Error: No privilege to proceed.");
}

// ============================================================================
// CLI
// ============================================================================

#[tokio::test]
async fn test_cli_records_command_writes_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CURSOR_ROUTE))
        .and(body_json(json!({"app": 4, "fields": ["Title"], "query": "limit 10"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cli",
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CURSOR_ROUTE))
        .and(query_param("id", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"Title": {"type": "SINGLE_LINE_TEXT", "value": "hello"}}],
            "next": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = Cli::try_parse_from([
        "kintone-sdk",
        "records",
        "--app",
        "4",
        "--fields",
        "Title",
        "--query",
        "limit 10",
    ])
    .unwrap();
    let runner = Runner::new(cli);
    let client = ClientConfig::new(server.uri()).record_client().unwrap();

    let mut out = Vec::new();
    runner.execute(&client, &mut out).await.unwrap();

    let output: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        output,
        json!({
            "records": [{"Title": {"type": "SINGLE_LINE_TEXT", "value": "hello"}}],
            "totalCount": 1
        })
    );
}

#[tokio::test]
async fn test_cli_records_without_app_fails_locally() {
    let server = MockServer::start().await;

    let cli = Cli::try_parse_from(["kintone-sdk", "records"]).unwrap();
    let runner = Runner::new(cli);
    let client = ClientConfig::new(server.uri()).record_client().unwrap();

    let mut out = Vec::new();
    let err = runner.execute(&client, &mut out).await.unwrap_err();

    assert_eq!(err.to_string(), "Error: app is a required argument.");
    assert!(out.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cli_delete_cursor_command() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(CURSOR_ROUTE))
        .and(body_json(json!({"id": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let cli = Cli::try_parse_from(["kintone-sdk", "delete-cursor", "--id", "abc"]).unwrap();
    let runner = Runner::new(cli);
    let client = ClientConfig::new(server.uri()).record_client().unwrap();

    let mut out = Vec::new();
    runner.execute(&client, &mut out).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim(), "{}");
}

#[test]
fn test_runner_loads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kintone.yaml");
    std::fs::write(
        &path,
        "domain: example.cybozu.com\nauth:\n  type: api_token\n  tokens: [abc]\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "kintone-sdk",
        "--config",
        path.to_str().unwrap(),
        "fetch-cursor",
        "--id",
        "1",
    ])
    .unwrap();
    let config = Runner::new(cli).load_config().unwrap();

    assert_eq!(config.domain, "example.cybozu.com");
    assert_eq!(config.auth, AuthConfig::api_token("abc"));
}
