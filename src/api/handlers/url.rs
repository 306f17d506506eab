//! Handler for short URL creation.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, CreateUrlResponse, PublicInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL and its secret admin URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "title": "Example",          // optional
///   "description": "A page"      // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortened_url": {
///     "url": "http://localhost:8000/K3Y9A",
///     "target_url": "https://example.com",
///     "title": "Example",
///     "description": "A page",
///     "is_active": true,
///     "clicks": 0
///   },
///   "admin_url": "http://localhost:8000/admin/S3CR7"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the target URL is invalid.
/// Returns 409 Conflict if no unique key could be allocated.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<Json<CreateUrlResponse>, AppError> {
    payload.validate()?;

    let service = &state.url_service;

    let record = service
        .create(&payload.target_url, payload.title, payload.description)
        .await?;

    let short_url = service.short_url(&record.key);
    let admin_url = service.admin_url(&record.secret_key);

    Ok(Json(CreateUrlResponse {
        shortened_url: PublicInfo::from_record(record, short_url),
        admin_url,
    }))
}
