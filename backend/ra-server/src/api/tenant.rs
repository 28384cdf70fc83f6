use crate::AppState;

use ra_tenant::OptionalTenant;

use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    /// `null` on the bare base domain and reserved subdomains
    pub tenant: Option<String>,
    pub base_domain: String,
}

/// GET /api/tenant - which hotel this host addresses
pub async fn current_tenant(
    State(state): State<AppState>,
    OptionalTenant(tenant): OptionalTenant,
) -> Json<TenantResponse> {
    Json(TenantResponse {
        tenant: tenant.map(|ctx| ctx.slug().to_string()),
        base_domain: state.resolver.base_domain().to_string(),
    })
}
