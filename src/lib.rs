//! # URLchemy
//!
//! A small URL shortener with secret-key administration, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the repository trait
//! - **Application Layer** ([`application`]) - Key allocation, resolution and administration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and metadata fetching
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random short keys, unique across keys and secret keys
//! - Click counting on every redirect
//! - Secret admin URLs for inspection and deactivation
//! - Best-effort title and description fetching
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://data/urls.db"   # default
//! export BASE_URL="http://localhost:8000"       # default
//!
//! # Migrations are applied at startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::UrlService;
    pub use crate::domain::entities::{NewUrlRecord, PageMetadata, UrlRecord, UrlSummary};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
