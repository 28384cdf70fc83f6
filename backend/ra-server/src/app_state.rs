use crate::ServerResult;

use ra_config::Config;
use ra_qr::QrCodec;
use ra_tenant::TenantResolver;

use std::sync::Arc;

/// Shared, read-only request state. Both the resolver and the codec are
/// stateless, so one instance serves every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub resolver: Arc<TenantResolver>,
    pub codec: Arc<QrCodec>,
    /// Origin guest URLs are built on
    pub qr_base_url: Arc<str>,
}

impl AppState {
    pub fn new(resolver: TenantResolver, codec: QrCodec, qr_base_url: &str) -> Self {
        Self {
            resolver: Arc::new(resolver),
            codec: Arc::new(codec),
            qr_base_url: Arc::from(qr_base_url),
        }
    }

    /// Build from validated configuration.
    pub fn from_config(config: &Config) -> ServerResult<Self> {
        let resolver = TenantResolver::new(&config.tenancy.base_domain)
            .with_reserved(&config.tenancy.reserved_subdomains);

        let mut codec = QrCodec::new()
            .with_max_age_ms(config.qr.max_age_ms())
            .with_max_clock_skew_ms(config.qr.max_clock_skew_ms());

        if let Some(secret) = &config.qr.signing_secret {
            codec = codec
                .with_signing_secret(secret.as_bytes())?
                .require_signature(config.qr.require_signature);
        }

        Ok(Self::new(resolver, codec, &config.qr.base_url))
    }
}
