//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! key generation, validation and metadata enrichment. Services consume
//! repository traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Create, resolve, administer and list short URLs

pub mod services;
