use crate::{QrError, QrSessionPayload};

use serde::Serialize;

/// Lifecycle of the guest session a QR code stands for.
///
/// `Unscanned -> ScannedValid -> Expired`. Expiry is driven by the clock alone
/// and there is no way back; a fresh code has to be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QrSessionState {
    #[default]
    Unscanned,
    ScannedValid,
    Expired,
}

impl QrSessionState {
    /// State after a scan. `None` for rejections that never formed a session
    /// (malformed, unsigned, ...).
    pub fn after_scan(result: &Result<QrSessionPayload, QrError>) -> Option<Self> {
        match result {
            Ok(_) => Some(Self::ScannedValid),
            Err(QrError::Expired { .. }) => Some(Self::Expired),
            Err(_) => None,
        }
    }

    /// Re-evaluate a previously accepted payload at `now_ms`.
    pub fn at(payload: &QrSessionPayload, now_ms: i64, max_age_ms: i64) -> Self {
        if payload.is_expired_at(now_ms, max_age_ms) {
            Self::Expired
        } else {
            Self::ScannedValid
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired)
    }
}
