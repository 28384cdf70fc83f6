use crate::ApiError;

use ra_qr::QrError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::assert_that;
use googletest::prelude::eq;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation("roomId cannot be empty", Some("roomId"));
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "roomId cannot be empty");
    assert_eq!(json["error"]["field"], "roomId");
}

#[tokio::test]
async fn test_expired_qr_returns_410() {
    let error = ApiError::from(QrError::Expired {
        age_ms: 90_000_000,
        max_age_ms: 86_400_000,
        location: here(),
    });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::GONE);
    assert_eq!(json["error"]["code"], "QR_EXPIRED");
    assert!(json["error"]["message"].as_str().unwrap().contains("expired"));
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_missing_field_reports_field_name() {
    let error = ApiError::from(QrError::MissingField {
        field: "roomNumber",
        location: here(),
    });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "QR_MISSING_FIELD");
    assert_eq!(json["error"]["field"], "roomNumber");
}

#[tokio::test]
async fn test_signature_failures_return_401() {
    for error in [
        QrError::Unsigned { location: here() },
        QrError::BadSignature { location: here() },
    ] {
        let code = error.error_code();
        let (status, json) = body_json(ApiError::from(error)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], code);
    }
}

#[tokio::test]
async fn test_malformed_message_hides_parser_detail() {
    let error = ApiError::from(QrError::Malformed {
        message: "expected value at line 1 column 1".into(),
        location: here(),
    });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "QR_MALFORMED");
    assert!(!json["error"]["message"].as_str().unwrap().contains("line 1"));
}

#[tokio::test]
async fn test_tenant_mismatch_returns_403() {
    let error = ApiError::TenantMismatch {
        tenant: "gunes".into(),
        hotel_id: "deniz".into(),
        location: here(),
    };
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "QR_TENANT_MISMATCH");
}

#[tokio::test]
async fn test_room_mismatch_returns_400() {
    let error = ApiError::RoomMismatch {
        path_room_id: "101".into(),
        payload_room_id: "102".into(),
        location: here(),
    };
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "QR_ROOM_MISMATCH");
}

#[test]
fn test_invalid_signing_key_is_a_server_error() {
    let error = ApiError::from(QrError::InvalidSigningKey {
        message: "too short".into(),
        location: here(),
    });

    assert_that!(error.status_code(), eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(error.error_code(), eq("QR_INVALID_SIGNING_KEY"));
}
