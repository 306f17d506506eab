//! Handler for the service root.

/// Returns a static greeting.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> &'static str {
    "Welcome to URLchemy!"
}
