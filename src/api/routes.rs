//! API route configuration.
//!
//! There is no authentication layer: admin routes are guarded only by the
//! unguessable secret key in their path.

use crate::api::handlers::{
    admin_info_handler, create_url_handler, deactivate_handler, distinct_targets_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL management routes.
///
/// # Endpoints
///
/// - `POST   /url`                 - Create a short URL
/// - `GET    /admin/{secret_key}`  - Admin view of a record
/// - `DELETE /admin/{secret_key}`  - Deactivate a record
/// - `GET    /data/urls`           - One record per distinct target host
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(create_url_handler))
        .route(
            "/admin/{secret_key}",
            get(admin_info_handler).delete(deactivate_handler),
        )
        .route("/data/urls", get(distinct_targets_handler))
}
