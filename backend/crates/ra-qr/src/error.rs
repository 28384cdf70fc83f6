use error_location::ErrorLocation;
use thiserror::Error;

/// Why a scanned QR payload was rejected.
///
/// Each variant maps to a distinct guest-facing message, so callers can tell
/// an expired link apart from a mangled one.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("Malformed QR payload: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("QR payload is missing field '{field}' {location}")]
    MissingField {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("QR payload expired: issued {age_ms}ms ago, max age {max_age_ms}ms {location}")]
    Expired {
        age_ms: i64,
        max_age_ms: i64,
        location: ErrorLocation,
    },

    #[error("QR payload issued {ahead_ms}ms in the future {location}")]
    FutureDated {
        ahead_ms: i64,
        location: ErrorLocation,
    },

    #[error("QR payload is not signed {location}")]
    Unsigned { location: ErrorLocation },

    #[error("QR payload signature does not match {location}")]
    BadSignature { location: ErrorLocation },

    #[error("Invalid QR signing key: {message} {location}")]
    InvalidSigningKey {
        message: String,
        location: ErrorLocation,
    },
}

impl QrError {
    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "QR_MALFORMED",
            Self::MissingField { .. } => "QR_MISSING_FIELD",
            Self::Expired { .. } => "QR_EXPIRED",
            Self::FutureDated { .. } => "QR_FUTURE_DATED",
            Self::Unsigned { .. } => "QR_UNSIGNED",
            Self::BadSignature { .. } => "QR_BAD_SIGNATURE",
            Self::InvalidSigningKey { .. } => "QR_INVALID_SIGNING_KEY",
        }
    }

    /// Payload field responsible for the rejection, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
