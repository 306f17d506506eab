//! Handler for the distinct target listing.

use axum::{Json, extract::State};

use crate::api::dto::url::{DistinctTargetsResponse, PublicInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Lists one active record per distinct target host, oldest first.
///
/// # Endpoint
///
/// `GET /data/urls`
///
/// # Errors
///
/// Returns 404 Not Found if the `urls` table does not exist.
pub async fn distinct_targets_handler(
    State(state): State<AppState>,
) -> Result<Json<DistinctTargetsResponse>, AppError> {
    let service = &state.url_service;

    let data = service
        .list_distinct_targets()
        .await?
        .into_iter()
        .map(|record| {
            let url = service.short_url(&record.key);
            PublicInfo::from_record(record, url)
        })
        .collect();

    Ok(Json(DistinctTargetsResponse { data }))
}
