//! Tests for the CARG API client

use super::*;
use crate::config::ConnectorConfig;
use crate::types::{FallbackPolicy, ResourceKind};
use futures::TryStreamExt;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> ConnectorConfig {
    ConnectorConfig::new(server.uri(), "token123")
        .with_page_size(2)
        .with_retry_delay(Duration::from_secs(0))
}

async fn collect_pages(client: &CargClient, kind: ResourceKind) -> Vec<Page> {
    let mut stream = client.fetch_all(kind);
    let mut pages = Vec::new();
    while let Some(page) = stream.try_next().await.unwrap() {
        pages.push(page);
    }
    pages
}

#[tokio::test]
async fn test_fetch_page_parses_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(query_param("skip", "0"))
        .and(query_param("take", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1}, {"id": 2}],
            "total": 5,
            "hasMore": true
        })))
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let page = client.fetch_page(ResourceKind::Project, 0, 2).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total, 5);
    assert!(page.has_more);
    assert!(!page.is_last(2));
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(header("authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let page = client.fetch_page(ResourceKind::Project, 0, 2).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_fetch_all_yields_ceil_m_over_p_pages() {
    let server = MockServer::start().await;

    // 5 items, page size 2 => pages of 2, 2, 1
    let items: Vec<_> = (1..=5).map(|i| json!({"id": i})).collect();
    for (skip, chunk) in [(0, &items[0..2]), (2, &items[2..4]), (4, &items[4..5])] {
        Mock::given(method("GET"))
            .and(path("/api/v1/services"))
            .and(query_param("skip", skip.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": chunk,
                "total": 5,
                "hasMore": false
            })))
            .mount(&server)
            .await;
    }

    let client = CargClient::new(test_config(&server)).unwrap();
    let pages = collect_pages(&client, ResourceKind::Service).await;

    assert_eq!(pages.len(), 3);
    let all: Vec<i64> = pages
        .iter()
        .flat_map(|p| p.items.iter())
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(all, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_fetch_all_empty_set_yields_no_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/components"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let pages = collect_pages(&client, ResourceKind::Component).await;
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_fetch_all_bare_array_is_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let pages = collect_pages(&client, ResourceKind::Project).await;

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 2);
}

#[tokio::test]
async fn test_rate_limit_retry_resumes_same_offset() {
    let server = MockServer::start().await;

    // First request is throttled, the reissued one succeeds at the same skip
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let page = client.fetch_page(ResourceKind::Project, 0, 2).await.unwrap();

    assert_eq!(page.offset, 0);
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_retry_budget_exhausted_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_rate_limit_retries(1)
        .with_fallback_policy(FallbackPolicy::FailFast);
    let client = CargClient::new(config).unwrap();

    let err = client
        .fetch_page(ResourceKind::Project, 0, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::RetryBudgetExhausted { attempts: 1 }
    ));
}

#[tokio::test]
async fn test_server_error_substitutes_fixture() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    let page = client
        .fetch_page(ResourceKind::Project, 0, 100)
        .await
        .unwrap();

    // Fixture set has two projects
    assert_eq!(page.len(), 2);
    assert_eq!(page.items[0]["name"], "E-Commerce Platform");
}

#[tokio::test]
async fn test_server_error_fails_fast_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let config = test_config(&server).with_fallback_policy(FallbackPolicy::FailFast);
    let client = CargClient::new(config).unwrap();

    let err = client
        .fetch_page(ResourceKind::Project, 0, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::HttpStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn test_mock_mode_serves_fixtures_without_network() {
    let client = CargClient::new(ConnectorConfig::default()).unwrap();
    let pages = collect_pages(&client, ResourceKind::Deployment).await;

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 3);
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let config = ConnectorConfig::new(server.uri(), "token123")
        .with_fallback_policy(FallbackPolicy::FailFast);
    let client = CargClient::new(config).unwrap();
    assert!(client.health_check().await);
}

#[tokio::test]
async fn test_health_check_degraded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "degraded"})))
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn test_ensure_webhook_skips_existing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"canCreateWebhooks": true})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://app.example.com/integration/webhook"}]
        })))
        .mount(&server)
        .await;

    // No POST mock mounted: creation would 404 and trip the expect below
    Mock::given(method("POST"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    client
        .ensure_webhook("https://app.example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ensure_webhook_creates_when_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"canCreateWebhooks": true})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "wh-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    client
        .ensure_webhook("https://app.example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ensure_webhook_without_permission_is_noop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"canCreateWebhooks": false})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = CargClient::new(test_config(&server)).unwrap();
    client
        .ensure_webhook("https://app.example.com")
        .await
        .unwrap();
}
