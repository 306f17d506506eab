//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::infrastructure::persistence::SqliteUrlRepository;

/// Handler state. Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<SqliteUrlRepository>>,
    /// Environment label reported by the health endpoint.
    pub env_name: Arc<str>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService<SqliteUrlRepository>>, env_name: &str) -> Self {
        Self {
            url_service,
            env_name: Arc::from(env_name),
        }
    }
}
