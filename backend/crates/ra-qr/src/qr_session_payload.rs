use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Room + hotel identity carried by a guest QR code.
///
/// On the wire the issue time is called `timestamp` (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSessionPayload {
    /// Opaque room identifier
    pub room_id: String,
    /// Human-readable room number
    pub room_number: String,
    /// Owning hotel (tenant) identifier
    pub hotel_id: String,
    #[serde(rename = "timestamp")]
    pub issued_at_epoch_ms: i64,
}

impl QrSessionPayload {
    pub fn new(
        room_id: impl Into<String>,
        room_number: impl Into<String>,
        hotel_id: impl Into<String>,
        issued_at_epoch_ms: i64,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            room_number: room_number.into(),
            hotel_id: hotel_id.into(),
            issued_at_epoch_ms,
        }
    }

    /// Milliseconds elapsed between issue and `now_ms`. Negative for future-dated payloads.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.issued_at_epoch_ms)
    }

    pub fn expires_at_epoch_ms(&self, max_age_ms: i64) -> i64 {
        self.issued_at_epoch_ms.saturating_add(max_age_ms)
    }

    /// Expiry is one-way: once true for some `now_ms` it stays true for every later one.
    pub fn is_expired_at(&self, now_ms: i64, max_age_ms: i64) -> bool {
        self.age_ms(now_ms) >= max_age_ms
    }

    /// JSON object that gets encoded into the QR code and, when signing is on,
    /// the exact bytes the HMAC covers.
    pub(crate) fn canonical_json(&self) -> Value {
        json!({
            "roomId": self.room_id,
            "roomNumber": self.room_number,
            "hotelId": self.hotel_id,
            "timestamp": self.issued_at_epoch_ms,
        })
    }
}
