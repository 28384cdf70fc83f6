use crate::{ConfigError, ConfigErrorResult, DEFAULT_BASE_DOMAIN};

use serde::Deserialize;

/// Subdomain-based tenant resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Domain tenants live under, e.g. `roomapp.com` for `gunes.roomapp.com`
    pub base_domain: String,
    /// Platform subdomains reserved on top of `www` and `api`
    pub reserved_subdomains: Vec<String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domain: String::from(DEFAULT_BASE_DOMAIN),
            reserved_subdomains: Vec::new(),
        }
    }
}

impl TenancyConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let domain = self.base_domain.as_str();

        if domain.trim().is_empty() {
            return Err(ConfigError::tenancy("tenancy.base_domain cannot be empty"));
        }

        if domain.trim() != domain {
            return Err(ConfigError::tenancy(format!(
                "tenancy.base_domain cannot have surrounding whitespace, got '{}'",
                domain
            )));
        }

        if domain.contains("://") || domain.contains('/') || domain.contains(':') {
            return Err(ConfigError::tenancy(format!(
                "tenancy.base_domain must be a bare domain without scheme, port or path, got '{}'",
                domain
            )));
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(ConfigError::tenancy(format!(
                "tenancy.base_domain cannot start or end with '.', got '{}'",
                domain
            )));
        }

        if let Some(label) = self
            .reserved_subdomains
            .iter()
            .find(|label| label.trim().is_empty() || label.contains('.'))
        {
            return Err(ConfigError::tenancy(format!(
                "tenancy.reserved_subdomains entries must be single non-empty labels, got '{}'",
                label
            )));
        }

        Ok(())
    }
}
