//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// The click is counted before the response is sent. The redirect is always
/// 307 Temporary so clients come back and every visit is counted.
///
/// # Errors
///
/// Returns 404 Not Found if no active record has this key.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let target_url = state.url_service.resolve(&key).await?;

    Ok(Redirect::temporary(&target_url))
}
