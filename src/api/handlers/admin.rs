//! Handlers for secret-key administration.
//!
//! The secret key in the path is the only credential: whoever holds the admin
//! URL may inspect and deactivate the record.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url::{AdminInfo, DeactivateResponse, PublicInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Returns a record's public info together with its admin URL.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}`
///
/// # Errors
///
/// Returns 404 Not Found if the secret key is unknown or the record is inactive.
pub async fn admin_info_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AdminInfo>, AppError> {
    let service = &state.url_service;
    let record = service.admin_lookup(&secret_key).await?;

    let short_url = service.short_url(&record.key);
    let admin_url = service.admin_url(&record.secret_key);

    Ok(Json(AdminInfo {
        info: PublicInfo::from_record(record, short_url),
        admin_url,
    }))
}

/// Deactivates a record.
///
/// # Endpoint
///
/// `DELETE /admin/{secret_key}`
///
/// # Response
///
/// ```json
/// { "detail": "Successfully deleted shortened URL for 'https://example.com'" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the secret key is unknown or the record is already
/// inactive.
pub async fn deactivate_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeactivateResponse>, AppError> {
    let detail = state.url_service.deactivate(&secret_key).await?;

    Ok(Json(DeactivateResponse { detail }))
}
