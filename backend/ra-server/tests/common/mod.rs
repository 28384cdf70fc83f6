#![allow(dead_code)]

//! Test infrastructure for ra-server API tests

use ra_qr::QrCodec;
use ra_server::AppState;
use ra_tenant::TenantResolver;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const BASE_DOMAIN: &str = "roomapp.com";
pub const QR_BASE_URL: &str = "https://guest.roomapp.com";
pub const TEST_SECRET: &[u8] = b"integration-test-signing-secret!";

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Unsigned codec with default freshness rules
pub fn create_test_app_state() -> AppState {
    AppState::new(TenantResolver::new(BASE_DOMAIN), QrCodec::new(), QR_BASE_URL)
}

/// Codec that signs issued payloads and rejects unsigned ones
pub fn create_signed_app_state() -> AppState {
    let codec = QrCodec::new()
        .with_signing_secret(TEST_SECRET)
        .expect("test secret is long enough");
    AppState::new(TenantResolver::new(BASE_DOMAIN), codec, QR_BASE_URL)
}

/// Payload encoded by the state's own codec, issued at `issued_at_ms`
pub fn encoded_payload(
    state: &AppState,
    room_id: &str,
    room_number: &str,
    hotel_id: &str,
    issued_at_ms: i64,
) -> String {
    let payload = state
        .codec
        .issue(room_id, room_number, hotel_id, issued_at_ms);
    state.codec.encode(&payload)
}

pub fn get_request(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json_request(host: &str, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("host", host)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// Send one request and parse the JSON body
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Send one request and return the body as text
pub async fn send_text(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
