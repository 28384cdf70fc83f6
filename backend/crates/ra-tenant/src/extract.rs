//! Axum extractors for the tenant attached by [`resolve_tenant_layer`](crate::resolve_tenant_layer)

use crate::{TenantContext, TenantError};

use std::convert::Infallible;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Resolved tenant; rejects with `TENANT_REQUIRED` when the request has none.
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

/// Resolved tenant, or `None` on the base domain.
#[derive(Debug, Clone)]
pub struct OptionalTenant(pub Option<TenantContext>);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = TenantError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .map(Tenant)
            .ok_or_else(|| TenantError::Missing {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl<S> FromRequestParts<S> for OptionalTenant
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalTenant(parts.extensions.get::<TenantContext>().cloned()))
    }
}
