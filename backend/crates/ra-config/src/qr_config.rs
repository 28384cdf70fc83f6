use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_QR_BASE_URL, DEFAULT_QR_MAX_AGE_SECS,
    DEFAULT_QR_MAX_CLOCK_SKEW_SECS, MAX_QR_MAX_AGE_SECS, MIN_SIGNING_SECRET_LEN,
};

use serde::Deserialize;

/// Guest QR code policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Origin guest URLs are built on, e.g. `https://roomapp.com`
    pub base_url: String,
    pub max_age_secs: u64,
    pub max_clock_skew_secs: u64,
    /// HMAC secret for signing payloads; unsigned payloads when unset
    pub signing_secret: Option<String>,
    /// Reject unsigned payloads (needs `signing_secret`)
    pub require_signature: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_QR_BASE_URL),
            max_age_secs: DEFAULT_QR_MAX_AGE_SECS,
            max_clock_skew_secs: DEFAULT_QR_MAX_CLOCK_SKEW_SECS,
            signing_secret: None,
            require_signature: false,
        }
    }
}

impl QrConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::qr(format!(
                "qr.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.max_age_secs == 0 || self.max_age_secs > MAX_QR_MAX_AGE_SECS {
            return Err(ConfigError::qr(format!(
                "qr.max_age_secs must be 1-{}, got {}",
                MAX_QR_MAX_AGE_SECS, self.max_age_secs
            )));
        }

        if self.max_clock_skew_secs >= self.max_age_secs {
            return Err(ConfigError::qr(format!(
                "qr.max_clock_skew_secs ({}) must be less than qr.max_age_secs ({})",
                self.max_clock_skew_secs, self.max_age_secs
            )));
        }

        match &self.signing_secret {
            Some(secret) if secret.len() < MIN_SIGNING_SECRET_LEN => {
                return Err(ConfigError::qr(format!(
                    "qr.signing_secret must be at least {} characters",
                    MIN_SIGNING_SECRET_LEN
                )));
            }
            None if self.require_signature => {
                return Err(ConfigError::qr(
                    "qr.require_signature is set but qr.signing_secret is missing",
                ));
            }
            _ => {}
        }

        Ok(())
    }

    pub fn max_age_ms(&self) -> i64 {
        (self.max_age_secs as i64).saturating_mul(1000)
    }

    pub fn max_clock_skew_ms(&self) -> i64 {
        (self.max_clock_skew_secs as i64).saturating_mul(1000)
    }
}
