pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::{ApiError, Result as ApiResult},
    guest::{GuestSessionResponse, open_guest_session},
    qr::{CreateQrRequest, CreateQrResponse, create_guest_qr},
    tenant::{TenantResponse, current_tenant},
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
