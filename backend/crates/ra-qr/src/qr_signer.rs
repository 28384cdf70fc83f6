use crate::{MIN_SIGNING_SECRET_LEN, QrError, Result as QrErrorResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer for QR payloads, keyed with a server-held secret.
#[derive(Clone)]
pub struct QrSigner {
    mac: HmacSha256,
}

impl QrSigner {
    #[track_caller]
    pub fn new(secret: &[u8]) -> QrErrorResult<Self> {
        if secret.len() < MIN_SIGNING_SECRET_LEN {
            return Err(QrError::InvalidSigningKey {
                message: format!(
                    "secret must be at least {} bytes, got {}",
                    MIN_SIGNING_SECRET_LEN,
                    secret.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mac = HmacSha256::new_from_slice(secret).map_err(|e| QrError::InvalidSigningKey {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { mac })
    }

    /// Hex-encoded signature over `message`
    pub fn sign(&self, message: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a hex signature against `message`
    #[track_caller]
    pub fn verify(&self, message: &str, signature_hex: &str) -> QrErrorResult<()> {
        let caller = Location::caller();
        let bad_signature = || QrError::BadSignature {
            location: ErrorLocation::from(caller),
        };

        let signature = hex::decode(signature_hex).map_err(|_| bad_signature())?;

        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        mac.verify_slice(&signature).map_err(|_| bad_signature())
    }
}

impl fmt::Debug for QrSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrSigner").finish_non_exhaustive()
    }
}
