use crate::TenantSlug;

/// Tenant resolved for the current request.
///
/// Lives in request extensions for the lifetime of one request and is
/// dropped with it; nothing persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_slug: TenantSlug,
}

impl TenantContext {
    pub fn new(tenant_slug: TenantSlug) -> Self {
        Self { tenant_slug }
    }

    pub fn slug(&self) -> &str {
        self.tenant_slug.as_str()
    }
}

impl From<TenantSlug> for TenantContext {
    fn from(tenant_slug: TenantSlug) -> Self {
        Self::new(tenant_slug)
    }
}
