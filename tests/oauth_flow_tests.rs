//! End-to-end token flow: acquire a token from the OAuth endpoint, then use
//! it as the bearer for delivery calls.

use serde_json::json;
use uberdirect::auth::oauth::{get_access_token, request_access_token};
use uberdirect::{
    ClientId, ClientSecret, CustomerId, HostUrl, OAuthError, OAuthVersion, UberDirect,
    UberDirectConfig,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> (ClientId, ClientSecret) {
    (
        ClientId::new("flow-client").unwrap(),
        ClientSecret::new("flow-secret").unwrap(),
    )
}

async fn mount_token_endpoint(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=eats.deliveries"))
        .and(body_string_contains("client_id=flow-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 2_592_000,
            "scope": "eats.deliveries"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_token_response_keeps_optional_fields() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "tok-123").await;
    let (id, secret) = credentials();

    let response = request_access_token(
        &HostUrl::new(server.uri()).unwrap(),
        &OAuthVersion::V2,
        &id,
        &secret,
    )
    .await
    .unwrap();

    assert_eq!(response.access_token, "tok-123");
    assert_eq!(response.token_type.as_deref(), Some("Bearer"));
    assert_eq!(response.expires_in, Some(2_592_000));
}

#[tokio::test]
async fn test_acquired_token_authenticates_delivery_calls() {
    let auth = MockServer::start().await;
    let api = MockServer::start().await;
    mount_token_endpoint(&auth, "tok-flow").await;

    Mock::given(method("POST"))
        .and(path("/v1/customers/cus_flow/deliveries/del_1/cancel"))
        .and(header("Authorization", "Bearer tok-flow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "del_1",
            "status": "canceled",
            "complete": true,
            "courier_imminent": false,
            "created": "2024-05-01T12:00:00Z",
            "currency": "usd",
            "deliverable_action": "deliverable_action_leave_at_door",
            "dropoff_eta": "2024-05-01T12:45:00Z",
            "fee": 0,
            "pickup_eta": "2024-05-01T12:10:00Z",
            "pickup_ready": "2024-05-01T12:00:00Z",
            "uuid": "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
            "tracking_url": "https://delivery.uber.com/orders/a1b2c3d4"
        })))
        .expect(1)
        .mount(&api)
        .await;

    let (id, secret) = credentials();
    let token = get_access_token(
        &HostUrl::new(auth.uri()).unwrap(),
        &OAuthVersion::V2,
        &id,
        &secret,
    )
    .await
    .unwrap();

    let config = UberDirectConfig::builder()
        .customer_id(CustomerId::new("cus_flow").unwrap())
        .access_token(token)
        .api_host(HostUrl::new(api.uri()).unwrap())
        .build()
        .unwrap();
    let delivery = UberDirect::new(config)
        .unwrap()
        .deliveries()
        .cancel_delivery("del_1")
        .await
        .unwrap();

    assert!(delivery.complete);
}

#[tokio::test]
async fn test_rejected_credentials_stop_the_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#))
        .mount(&server)
        .await;
    let (id, secret) = credentials();

    let error = get_access_token(
        &HostUrl::new(server.uri()).unwrap(),
        &OAuthVersion::V2,
        &id,
        &secret,
    )
    .await
    .unwrap_err();

    match error {
        OAuthError::TokenRequestFailed { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid_client"));
        }
        other => panic!("Expected TokenRequestFailed, got: {other:?}"),
    }
}
