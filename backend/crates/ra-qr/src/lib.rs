mod error;
mod guest_url;
mod qr_codec;
mod qr_session_payload;
mod qr_session_state;
mod qr_signer;

pub use error::{QrError, Result};
pub use guest_url::{extract_data_param, guest_url};
pub use qr_codec::{QrCodec, decode_and_validate, encode_qr_payload};
pub use qr_session_payload::QrSessionPayload;
pub use qr_session_state::QrSessionState;
pub use qr_signer::QrSigner;

#[cfg(test)]
mod tests;

/// How long a printed QR code stays valid after it was issued (24 hours).
pub const DEFAULT_MAX_AGE_MS: i64 = 86_400_000;

/// How far in the future an `issued_at` may be before it is rejected (5 minutes).
pub const DEFAULT_MAX_CLOCK_SKEW_MS: i64 = 300_000;

/// Shortest accepted HMAC signing secret, in bytes.
pub const MIN_SIGNING_SECRET_LEN: usize = 32;

/// Current wall-clock time as epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
