//! Integration tests for the request executor.
//!
//! These tests run the executor against a mock server and check the retry
//! budget, backoff timing, bearer authentication, and error mapping.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use uberdirect::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, RetryPolicy};
use uberdirect::{AccessToken, CustomerId, HostUrl, UberDirectConfig};
use wiremock::http::HeaderName;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CUSTOMER: &str = "cus_test";
const BASE_PATH: &str = "/v1/customers/cus_test";

/// Backoff short enough to keep the suite fast.
fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::default()
        .with_max_retries(max_retries)
        .with_backoff(Duration::from_millis(1), Duration::from_millis(5))
}

fn create_client(server: &MockServer, token: AccessToken, policy: RetryPolicy) -> HttpClient {
    let config = UberDirectConfig::builder()
        .customer_id(CustomerId::new(CUSTOMER).unwrap())
        .access_token(token)
        .api_host(HostUrl::new(server.uri()).unwrap())
        .retry_policy(policy)
        .build()
        .unwrap();
    HttpClient::new(config).unwrap()
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

// ============================================================================
// Success Paths
// ============================================================================

#[tokio::test]
async fn test_success_returns_parsed_json_with_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/deliveries/del_1")))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "del_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "test-token".into(), fast_policy(3));
    let body = client.get(["deliveries", "del_1"], None).await.unwrap();

    assert_eq!(body, json!({"id": "del_1"}));
}

#[tokio::test]
async fn test_post_sends_json_body_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{BASE_PATH}/deliveries/del_1/cancel")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "canceled"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(0));
    let body = client
        .post(["deliveries", "del_1", "cancel"], json!({}))
        .await
        .unwrap();

    assert_eq!(body["status"], "canceled");
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/deliveries")))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(0));
    let request = HttpRequest::builder(HttpMethod::Get, ["deliveries"])
        .query_param("limit", "5")
        .build()
        .unwrap();

    assert_eq!(client.request(request).await.unwrap(), json!({"data": []}));
}

#[tokio::test]
async fn test_empty_success_body_parses_as_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(0));
    let body = client.post(["deliveries"], json!({"a": 1})).await.unwrap();

    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_user_agent_carries_prefix_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let config = UberDirectConfig::builder()
        .customer_id(CustomerId::new(CUSTOMER).unwrap())
        .access_token("t")
        .api_host(HostUrl::new(server.uri()).unwrap())
        .user_agent_prefix("MyApp/1.0")
        .build()
        .unwrap();
    let client = HttpClient::new(config).unwrap();
    client.get(["deliveries"], None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let name: HeaderName = "user-agent".parse().unwrap();
    let user_agent = requests[0].headers.get(&name).unwrap().as_str().to_string();
    assert!(user_agent.starts_with("MyApp/1.0 | UberDirect Rust Library v"));
}

// ============================================================================
// Retry Behavior
// ============================================================================

#[tokio::test]
async fn test_two_transient_failures_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"code": "unavailable"})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(3));
    let body = client.get(["deliveries"], None).await.unwrap();

    assert_eq!(body, json!({"ok": true}));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_backoff_waits_between_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    // Default backoff: 1s after the first failure, 2s after the second
    let client = create_client(
        &server,
        "t".into(),
        RetryPolicy::default().with_max_retries(3),
    );
    let start = Instant::now();
    client.get(["deliveries"], None).await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(3));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_persistent_failure_exhausts_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"code": "internal", "message": "boom", "extra": 1})),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(3));
    let error = client.post(["deliveries"], json!({})).await.unwrap_err();

    match error {
        HttpError::MaxRetries(e) => {
            assert_eq!(e.code, 500);
            assert_eq!(e.tries, 4);
            assert_eq!(e.message, r#"{"code":"internal","message":"boom"}"#);
            assert_eq!(e.body["extra"], 1);
        }
        other => panic!("Expected MaxRetries, got: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_non_retriable_status_fails_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"code": "not_found", "message": "no"})),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(3));
    let error = client.get(["deliveries", "missing"], None).await.unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert!(matches!(error, HttpError::Response(ref e) if e.body["code"] == "not_found"));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_zero_retries_reports_plain_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(0));
    let error = client.get(["deliveries"], None).await.unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 503);
            assert_eq!(e.message, "upstream down");
            assert_eq!(e.body, json!({"raw_body": "upstream down"}));
        }
        other => panic!("Expected Response, got: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_custom_retriable_codes_replace_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let policy = fast_policy(3).with_retriable_status_codes([409]);
    let client = create_client(&server, "t".into(), policy);
    let error = client.get(["deliveries"], None).await.unwrap_err();

    assert!(matches!(error, HttpError::Response(_)));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_token_supplier_is_called_on_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let token = AccessToken::supplier(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("token-{n}")
    });

    let client = create_client(&server, token, fast_policy(3));
    let body = client.get(["deliveries"], None).await.unwrap();

    assert_eq!(body, json!({"ok": true}));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_invalid_success_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = create_client(&server, "t".into(), fast_policy(3));
    let error = client.get(["deliveries"], None).await.unwrap_err();

    assert!(matches!(error, HttpError::Decode(ref e) if e.body == "<html>"));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_transport_errors_are_not_retried() {
    let config = UberDirectConfig::builder()
        .customer_id(CustomerId::new(CUSTOMER).unwrap())
        .access_token("t")
        .api_host(HostUrl::new("http://127.0.0.1:1").unwrap())
        .retry_policy(fast_policy(3))
        .build()
        .unwrap();
    let client = HttpClient::new(config).unwrap();

    let error = client.get(["deliveries"], None).await.unwrap_err();
    assert!(matches!(error, HttpError::Network(_)));
}

#[tokio::test]
async fn test_post_without_body_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server, "t".into(), fast_policy(0));

    let request = HttpRequest {
        http_method: HttpMethod::Post,
        segments: vec!["deliveries".to_string()],
        body: None,
        query: None,
        extra_headers: None,
    };
    let error = client.request(request).await.unwrap_err();

    assert!(matches!(error, HttpError::InvalidRequest(_)));
    assert_eq!(request_count(&server).await, 0);
}
