use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenantError {
    /// Handler needs a tenant but the request came in on the base domain
    /// or a reserved subdomain.
    #[error("Tenant subdomain required {location}")]
    Missing { location: ErrorLocation },
}

impl TenantError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "TENANT_REQUIRED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Missing { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for TenantError {
    fn into_response(self) -> Response {
        log::warn!("{}", self);

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": "This page is only available on a hotel subdomain",
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, TenantError>;
