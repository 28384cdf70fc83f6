//! Guest entry point reached by scanning a room's QR code

use crate::{ApiError, ApiResult, AppState};

use ra_qr::{QrSessionState, extract_data_param};
use ra_tenant::OptionalTenant;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use error_location::ErrorLocation;
use serde::Serialize;

/// Validated room identity the guest app keeps for its session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSessionResponse {
    pub room_id: String,
    pub room_number: String,
    pub hotel_id: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub state: QrSessionState,
}

/// GET /guest/{room_id}?data={encoded_payload}
pub async fn open_guest_session(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    RawQuery(query): RawQuery,
    OptionalTenant(tenant): OptionalTenant,
) -> ApiResult<Json<GuestSessionResponse>> {
    // The codec decodes the payload itself, so read it from the raw query
    let data = query
        .as_deref()
        .and_then(extract_data_param)
        .ok_or_else(|| ApiError::validation("Missing QR data parameter", Some("data")))?;

    let result = state.codec.decode_and_validate(data, ra_qr::now_epoch_ms());
    if QrSessionState::after_scan(&result).is_some_and(|s| s.is_terminal()) {
        log::info!("Expired QR scanned for room {}", room_id);
    }
    let payload = result?;

    if payload.room_id != room_id {
        return Err(ApiError::RoomMismatch {
            path_room_id: room_id,
            payload_room_id: payload.room_id,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if let Some(ctx) = tenant
        && !ctx.slug().eq_ignore_ascii_case(&payload.hotel_id)
    {
        return Err(ApiError::TenantMismatch {
            tenant: ctx.slug().to_string(),
            hotel_id: payload.hotel_id,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::debug!(
        "Guest session opened for room {} of hotel {}",
        payload.room_id,
        payload.hotel_id
    );

    Ok(Json(GuestSessionResponse {
        expires_at: payload.expires_at_epoch_ms(state.codec.max_age_ms()),
        issued_at: payload.issued_at_epoch_ms,
        room_id: payload.room_id,
        room_number: payload.room_number,
        hotel_id: payload.hotel_id,
        state: QrSessionState::ScannedValid,
    }))
}
