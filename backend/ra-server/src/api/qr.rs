//! QR code issuing for admin tooling

use crate::{ApiError, ApiResult, AppState};

use ra_tenant::OptionalTenant;

use std::panic::Location;

use axum::{Json, extract::State};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    pub room_id: String,
    pub room_number: String,
    /// Defaults to the tenant resolved from the subdomain
    #[serde(default)]
    pub hotel_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrResponse {
    /// Guest URL to render as a QR code
    pub url: String,
    /// Encoded payload, as carried in the `data` query parameter
    pub data: String,
    pub room_id: String,
    pub hotel_id: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// POST /api/qr
pub async fn create_guest_qr(
    State(state): State<AppState>,
    OptionalTenant(tenant): OptionalTenant,
    Json(request): Json<CreateQrRequest>,
) -> ApiResult<Json<CreateQrResponse>> {
    let room_id = required(&request.room_id, "roomId")?;
    let room_number = required(&request.room_number, "roomNumber")?;

    let requested_hotel = request
        .hotel_id
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());

    let hotel_id = match (tenant.as_ref(), requested_hotel) {
        (Some(ctx), Some(hotel)) if !ctx.slug().eq_ignore_ascii_case(hotel) => {
            return Err(ApiError::TenantMismatch {
                tenant: ctx.slug().to_string(),
                hotel_id: hotel.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        // Slugs are lowercase, so the tenant's spelling wins
        (Some(ctx), _) => ctx.slug().to_string(),
        (None, Some(hotel)) => hotel.to_string(),
        (None, None) => {
            return Err(ApiError::validation(
                "hotelId is required outside a hotel subdomain",
                Some("hotelId"),
            ));
        }
    };

    let payload = state
        .codec
        .issue(room_id, room_number, hotel_id, ra_qr::now_epoch_ms());
    let data = state.codec.encode(&payload);
    let url = ra_qr::guest_url(&state.qr_base_url, &payload.room_id, &data);

    log::info!(
        "Issued guest QR for room {} of hotel {}",
        payload.room_id,
        payload.hotel_id
    );

    Ok(Json(CreateQrResponse {
        url,
        data,
        expires_at: payload.expires_at_epoch_ms(state.codec.max_age_ms()),
        issued_at: payload.issued_at_epoch_ms,
        room_id: payload.room_id,
        hotel_id: payload.hotel_id,
    }))
}

#[track_caller]
fn required<'a>(value: &'a str, field: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(
            format!("{} cannot be empty", field),
            Some(field),
        ));
    }
    Ok(trimmed)
}
