//! Per-request tenant resolution for axum routers.
//!
//! Wrap the whole router so resolution happens before routing:
//!
//! ```ignore
//! let resolver = Arc::new(TenantResolver::new("roomapp.com"));
//! let router = Router::new().route("/api/tenant", get(handler));
//! let app = axum::middleware::from_fn_with_state(resolver, resolve_tenant_layer).layer(router);
//! ```

use crate::{TENANT_HEADER, TenantContext, TenantResolver};

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderValue, header::HOST};
use log::debug;

/// Resolve the tenant from `Host` (or the URI authority for HTTP/2) and attach
/// it as the `x-tenant` header plus a [`TenantContext`] extension.
///
/// Any `x-tenant` the client sent is dropped first, so handlers only ever see
/// the resolver's answer. All other headers pass through untouched.
pub fn apply_tenant<B>(
    resolver: &TenantResolver,
    request: &mut http::Request<B>,
) -> Option<TenantContext> {
    request.headers_mut().remove(TENANT_HEADER);

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| request.uri().authority().map(|a| a.as_str().to_owned()))?;

    let slug = resolver.resolve(&host)?;

    // Slugs are restricted to [a-z0-9-], always a valid header value
    if let Ok(value) = HeaderValue::from_str(slug.as_str()) {
        request.headers_mut().insert(TENANT_HEADER, value);
    }

    let context = TenantContext::new(slug);
    request.extensions_mut().insert(context.clone());
    Some(context)
}

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn resolve_tenant_layer(
    State(resolver): State<Arc<TenantResolver>>,
    mut request: Request,
    next: Next,
) -> Response {
    match apply_tenant(&resolver, &mut request) {
        Some(context) => debug!(
            "{} {} -> tenant '{}'",
            request.method(),
            request.uri().path(),
            context.slug()
        ),
        None => debug!(
            "{} {} -> no tenant",
            request.method(),
            request.uri().path()
        ),
    }

    next.run(request).await
}
