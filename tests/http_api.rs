//! End-to-end tests for the launchpad API surface

use axum::body::{to_bytes, Body};
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use launchpad_api::admission::AdmissionService;
use launchpad_api::api::{create_app, ApiState};
use launchpad_api::config::{LaunchpadConfig, QuotaResetPolicy};
use launchpad_api::core::clock::SystemClock;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

const VALID_WALLET: &str = "11111111111111111111111111111111";

fn app() -> Router {
    let mut config = LaunchpadConfig::default();
    // The rolling policy anchors the quota window at service construction,
    // keeping these tests independent of where the wall clock sits relative
    // to an hour boundary. The clock-hour policy is covered by unit tests
    // with a manual clock.
    config.admission.quota_reset_policy = QuotaResetPolicy::Rolling;
    let admission = Arc::new(AdmissionService::new(
        config.admission.clone(),
        Arc::new(SystemClock),
    ));
    let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
    create_app(ApiState::new(admission), &config.api).layer(MockConnectInfo(peer))
}

fn valid_payload() -> Value {
    json!({
        "name": "Test Coin",
        "ticker": "TST",
        "walletAddress": VALID_WALLET,
        "feeTransactionSignature": "1".repeat(88),
    })
}

fn post_json(uri: &str, client: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "launchpad-api");
}

#[tokio::test]
async fn valid_launch_is_accepted_and_listed() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/api/launch", "203.0.113.1", &valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["token"]["ticker"], "TST");
    assert_eq!(body["token"]["initialPrice"], 0.001);
    assert_eq!(body["token"]["currentPrice"], 0.001);
    assert_eq!(body["token"]["volume24h"], 0.0);
    assert_eq!(body["launchesRemaining"], 9);

    let status = body_json(app.clone().oneshot(get("/api/launch")).await.unwrap()).await;
    assert_eq!(status["launchCount"], 1);
    assert_eq!(status["maxLaunches"], 10);
    assert_eq!(status["launchesRemaining"], 9);
    assert!(status["timeUntilReset"].as_i64().unwrap() >= 0);

    let tokens = body_json(app.oneshot(get("/api/tokens")).await.unwrap()).await;
    assert_eq!(tokens["success"], true);
    assert_eq!(tokens["tokens"].as_array().unwrap().len(), 1);
    assert_eq!(tokens["tokens"][0]["ticker"], "TST");
}

#[tokio::test]
async fn newest_launch_is_listed_first() {
    let app = app();

    for (client, ticker) in [("203.0.113.1", "AAA"), ("203.0.113.2", "BBB")] {
        let mut payload = valid_payload();
        payload["ticker"] = json!(ticker);
        let response = app
            .clone()
            .oneshot(post_json("/api/launch", client, &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let tokens = body_json(app.oneshot(get("/api/tokens")).await.unwrap()).await;
    let listed: Vec<&str> = tokens["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["ticker"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec!["BBB", "AAA"]);
}

#[tokio::test]
async fn invalid_ticker_is_rejected_with_details() {
    let mut payload = valid_payload();
    payload["ticker"] = json!("test!");

    let response = app()
        .oneshot(post_json("/api/launch", "203.0.113.1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "VALIDATION");
    let details = body["details"].as_array().unwrap();
    assert!(details
        .iter()
        .any(|d| d.as_str().unwrap().contains("ticker format")));
}

#[tokio::test]
async fn missing_fields_are_all_reported_in_one_response() {
    let response = app()
        .oneshot(post_json("/api/launch", "203.0.113.1", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    for field in ["name", "ticker", "walletAddress", "feeTransactionSignature"] {
        assert!(details.iter().any(|d| d.contains(field)), "missing {field}");
    }
}

#[tokio::test]
async fn malformed_body_is_rejected_as_validation() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/launch")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.1")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn sixth_request_from_one_client_is_rate_limited() {
    let app = app();

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(post_json("/api/launch", "203.0.113.1", &valid_payload()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/launch", "203.0.113.1", &valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "RATE_LIMIT");

    // A different client still gets through: quota has room.
    let response = app
        .oneshot(post_json("/api/launch", "203.0.113.2", &valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn quota_exhaustion_reports_reset_time() {
    let app = app();

    for client in ["203.0.113.1", "203.0.113.2"] {
        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(post_json("/api/launch", client, &valid_payload()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/launch", "203.0.113.3", &valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "QUOTA_EXCEEDED");
    assert!(body["timeUntilReset"].as_i64().unwrap() >= 0);

    let status = body_json(app.oneshot(get("/api/launch")).await.unwrap()).await;
    assert_eq!(status["launchesRemaining"], 0);
}

#[tokio::test]
async fn create_token_reserves_a_mint_address() {
    let payload = json!({
        "name": "Test Coin",
        "symbol": "TST",
        "walletAddress": VALID_WALLET,
    });
    let response = app()
        .oneshot(post_json("/api/create-token", "203.0.113.1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["token"]["status"], "pending_creation");
    assert_eq!(body["token"]["initialSupply"], 1_000_000);
    assert_eq!(body["token"]["decimals"], 9);
    // The reserved mint must be a real public key.
    use std::str::FromStr;
    solana_sdk::pubkey::Pubkey::from_str(body["token"]["mint"].as_str().unwrap()).unwrap();
}

#[tokio::test]
async fn create_token_requires_name_symbol_and_wallet() {
    let response = app()
        .oneshot(post_json("/api/create-token", "203.0.113.1", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "VALIDATION");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
}
