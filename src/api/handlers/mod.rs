//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod data;
pub mod health;
pub mod redirect;
pub mod root;
pub mod url;

pub use admin::{admin_info_handler, deactivate_handler};
pub use data::distinct_targets_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use root::root_handler;
pub use url::create_url_handler;
