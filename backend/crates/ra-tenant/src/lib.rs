pub mod error;
pub mod extract;
pub mod layer;
pub mod tenant_context;
pub mod tenant_resolver;
pub mod tenant_slug;

pub use error::{Result, TenantError};
pub use extract::{OptionalTenant, Tenant};
pub use layer::{apply_tenant, resolve_tenant_layer};
pub use tenant_context::TenantContext;
pub use tenant_resolver::{TenantResolver, resolve_tenant};
pub use tenant_slug::TenantSlug;

#[cfg(test)]
mod tests;

/// Header downstream handlers read the resolved tenant from.
pub const TENANT_HEADER: &str = "x-tenant";

/// Platform subdomains that never name a tenant.
pub const RESERVED_SUBDOMAINS: [&str; 2] = ["www", "api"];

/// Longest DNS label (RFC 1035).
pub const MAX_LABEL_LEN: usize = 63;
