use crate::{AppState, create_guest_qr, current_tenant, health, open_guest_session};

use ra_tenant::resolve_tenant_layer;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let resolver = state.resolver.clone();

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Tenant-aware API
        .route("/api/tenant", get(current_tenant))
        .route("/api/qr", post(create_guest_qr))
        // Guest entry point encoded in room QR codes
        .route("/guest/{room_id}", get(open_guest_session))
        .with_state(state)
        // Resolve the tenant from Host before any handler runs
        .layer(middleware::from_fn_with_state(resolver, resolve_tenant_layer))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
