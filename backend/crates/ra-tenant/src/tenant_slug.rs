use crate::MAX_LABEL_LEN;

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// Tenant identifier taken from a request's subdomain.
///
/// Always a single lowercase DNS label: `[a-z0-9-]`, 1-63 chars, no leading
/// or trailing hyphen. Only [`TenantSlug::parse`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Accepts `label` if it is a valid DNS label, folding ASCII case.
    pub fn parse(label: &str) -> Option<Self> {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return None;
        }

        if label.starts_with('-') || label.ends_with('-') {
            return None;
        }

        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return None;
        }

        Some(Self(label.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for TenantSlug {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TenantSlug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TenantSlug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
