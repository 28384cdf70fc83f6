//! REST API error types
//!
//! Every error renders as `{ "error": { "code", "message", "field"? } }`
//! with a status code matching its kind.

use ra_qr::QrError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. "QR_EXPIRED", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable, guest-safe message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or query failed validation (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Scanned QR payload was rejected by the codec
    #[error("QR rejected: {source}")]
    QrRejected {
        #[source]
        source: QrError,
    },

    /// Path room does not match the room inside the payload (400)
    #[error("Room mismatch: path '{path_room_id}', payload '{payload_room_id}' {location}")]
    RoomMismatch {
        path_room_id: String,
        payload_room_id: String,
        location: ErrorLocation,
    },

    /// Payload or request names a hotel other than the subdomain's tenant (403)
    #[error("Tenant mismatch: tenant '{tenant}', hotel '{hotel_id}' {location}")]
    TenantMismatch {
        tenant: String,
        hotel_id: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::RoomMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::TenantMismatch { .. } => StatusCode::FORBIDDEN,
            ApiError::QrRejected { source } => match source {
                QrError::Expired { .. } => StatusCode::GONE,
                QrError::Unsigned { .. } | QrError::BadSignature { .. } => {
                    StatusCode::UNAUTHORIZED
                }
                QrError::InvalidSigningKey { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                QrError::Malformed { .. }
                | QrError::MissingField { .. }
                | QrError::FutureDated { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::QrRejected { source } => source.error_code(),
            ApiError::RoomMismatch { .. } => "QR_ROOM_MISMATCH",
            ApiError::TenantMismatch { .. } => "QR_TENANT_MISMATCH",
        }
    }

    /// Message shown to the guest. Internal detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::QrRejected { source } => match source {
                QrError::Expired { .. } => {
                    "This QR code has expired. Please scan the code in your room again.".into()
                }
                QrError::Unsigned { .. } | QrError::BadSignature { .. } => {
                    "This QR code could not be verified.".into()
                }
                QrError::InvalidSigningKey { .. } => "QR codes are unavailable right now.".into(),
                QrError::Malformed { .. }
                | QrError::MissingField { .. }
                | QrError::FutureDated { .. } => "This QR code link is not valid.".into(),
            },
            ApiError::RoomMismatch { .. } => "This QR code belongs to a different room.".into(),
            ApiError::TenantMismatch { .. } => "This QR code belongs to a different hotel.".into(),
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            ApiError::Validation { field, .. } => field.clone(),
            ApiError::QrRejected { source } => source.field().map(String::from),
            _ => None,
        }
    }
}

impl From<QrError> for ApiError {
    fn from(source: QrError) -> Self {
        ApiError::QrRejected { source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("[{}] {}", self.error_code(), self);
        }

        let body = ApiErrorBody {
            code: self.error_code().to_string(),
            message: self.public_message(),
            field: self.field(),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
