use crate::{
    DEFAULT_MAX_AGE_MS, DEFAULT_MAX_CLOCK_SKEW_MS, QrError, QrSessionPayload, QrSigner,
    Result as QrErrorResult, guest_url,
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Deserialize;
use serde_json::Value;

/// Payload as it arrives from a scan. Every field is optional so a missing
/// one can be reported by name instead of as a generic parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScannedPayload {
    room_id: Option<String>,
    room_number: Option<String>,
    hotel_id: Option<String>,
    timestamp: Option<i64>,
    sig: Option<String>,
}

/// Encodes guest QR payloads and validates scanned ones.
///
/// Stateless: validation is repeatable and never remembers what it has seen,
/// so the same encoded string gives the same answer for the same `now`.
#[derive(Debug, Clone)]
pub struct QrCodec {
    max_age_ms: i64,
    max_clock_skew_ms: i64,
    signer: Option<QrSigner>,
    require_signature: bool,
}

impl Default for QrCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl QrCodec {
    /// Unsigned codec with the 24 hour expiry policy
    pub fn new() -> Self {
        Self {
            max_age_ms: DEFAULT_MAX_AGE_MS,
            max_clock_skew_ms: DEFAULT_MAX_CLOCK_SKEW_MS,
            signer: None,
            require_signature: false,
        }
    }

    pub fn with_max_age_ms(mut self, max_age_ms: i64) -> Self {
        self.max_age_ms = max_age_ms;
        self
    }

    pub fn with_max_clock_skew_ms(mut self, max_clock_skew_ms: i64) -> Self {
        self.max_clock_skew_ms = max_clock_skew_ms.max(0);
        self
    }

    /// Sign every encoded payload and reject unsigned or tampered scans.
    #[track_caller]
    pub fn with_signing_secret(mut self, secret: &[u8]) -> QrErrorResult<Self> {
        self.signer = Some(QrSigner::new(secret)?);
        self.require_signature = true;
        Ok(self)
    }

    /// With a signer configured, `false` still verifies signatures that are
    /// present but lets unsigned payloads through.
    pub fn require_signature(mut self, required: bool) -> Self {
        self.require_signature = required && self.signer.is_some();
        self
    }

    pub fn max_age_ms(&self) -> i64 {
        self.max_age_ms
    }

    pub fn is_signing(&self) -> bool {
        self.signer.is_some()
    }

    pub fn issue(
        &self,
        room_id: impl Into<String>,
        room_number: impl Into<String>,
        hotel_id: impl Into<String>,
        now_ms: i64,
    ) -> QrSessionPayload {
        QrSessionPayload::new(room_id, room_number, hotel_id, now_ms)
    }

    /// JSON text, percent-encoded so it can ride in a query string.
    pub fn encode(&self, payload: &QrSessionPayload) -> String {
        let mut json = payload.canonical_json();

        if let Some(signer) = &self.signer {
            let signature = signer.sign(&json.to_string());
            if let Value::Object(map) = &mut json {
                map.insert("sig".to_string(), Value::String(signature));
            }
        }

        urlencoding::encode(&json.to_string()).into_owned()
    }

    /// Encode `payload` and embed it in the room's guest URL.
    pub fn guest_url(&self, base_url: &str, payload: &QrSessionPayload) -> String {
        guest_url(base_url, &payload.room_id, &self.encode(payload))
    }

    /// Decode a scanned payload and check structure, signature and freshness, in that order.
    #[track_caller]
    pub fn decode_and_validate(
        &self,
        encoded: &str,
        now_ms: i64,
    ) -> QrErrorResult<QrSessionPayload> {
        let caller = Location::caller();

        let json = urlencoding::decode(encoded).map_err(|e| QrError::Malformed {
            message: format!("invalid percent-encoding: {}", e),
            location: ErrorLocation::from(caller),
        })?;

        let scanned: ScannedPayload =
            serde_json::from_str(&json).map_err(|e| QrError::Malformed {
                message: format!("invalid JSON: {}", e),
                location: ErrorLocation::from(caller),
            })?;

        let signature = scanned.sig.clone();
        let payload = Self::require_fields(scanned, caller)?;

        self.check_signature(&payload, signature.as_deref(), caller)?;
        self.check_freshness(&payload, now_ms, caller)?;

        Ok(payload)
    }

    fn require_fields(
        scanned: ScannedPayload,
        caller: &'static Location<'static>,
    ) -> QrErrorResult<QrSessionPayload> {
        let missing = |field: &'static str| QrError::MissingField {
            field,
            location: ErrorLocation::from(caller),
        };

        let room_id = scanned
            .room_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("roomId"))?;
        let room_number = scanned
            .room_number
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("roomNumber"))?;
        let hotel_id = scanned
            .hotel_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("hotelId"))?;
        let issued_at = scanned
            .timestamp
            .filter(|v| *v != 0)
            .ok_or_else(|| missing("timestamp"))?;

        Ok(QrSessionPayload::new(room_id, room_number, hotel_id, issued_at))
    }

    fn check_signature(
        &self,
        payload: &QrSessionPayload,
        signature: Option<&str>,
        caller: &'static Location<'static>,
    ) -> QrErrorResult<()> {
        let Some(signer) = &self.signer else {
            return Ok(());
        };

        match signature {
            Some(sig) => signer
                .verify(&payload.canonical_json().to_string(), sig)
                .map_err(|_| QrError::BadSignature {
                    location: ErrorLocation::from(caller),
                }),
            None if self.require_signature => Err(QrError::Unsigned {
                location: ErrorLocation::from(caller),
            }),
            None => Ok(()),
        }
    }

    fn check_freshness(
        &self,
        payload: &QrSessionPayload,
        now_ms: i64,
        caller: &'static Location<'static>,
    ) -> QrErrorResult<()> {
        let age_ms = payload.age_ms(now_ms);

        if age_ms < self.max_clock_skew_ms.saturating_neg() {
            return Err(QrError::FutureDated {
                ahead_ms: age_ms.saturating_neg(),
                location: ErrorLocation::from(caller),
            });
        }

        if payload.is_expired_at(now_ms, self.max_age_ms) {
            return Err(QrError::Expired {
                age_ms,
                max_age_ms: self.max_age_ms,
                location: ErrorLocation::from(caller),
            });
        }

        Ok(())
    }
}

/// Encode an unsigned payload issued at `now_ms`.
pub fn encode_qr_payload(
    room_id: &str,
    room_number: &str,
    hotel_id: &str,
    now_ms: i64,
) -> String {
    let codec = QrCodec::new();
    codec.encode(&codec.issue(room_id, room_number, hotel_id, now_ms))
}

/// Validate an unsigned payload against `max_age_ms`. Use `.ok()` for a plain present/absent answer.
#[track_caller]
pub fn decode_and_validate(
    encoded: &str,
    now_ms: i64,
    max_age_ms: i64,
) -> QrErrorResult<QrSessionPayload> {
    QrCodec::new()
        .with_max_age_ms(max_age_ms)
        .decode_and_validate(encoded, now_ms)
}
