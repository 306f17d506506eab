//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and page metadata fetching.
//!
//! # Modules
//!
//! - [`enrichment`] - Page metadata fetching (HTTP and no-op implementations)
//! - [`persistence`] - SQLite repository implementations

pub mod enrichment;
pub mod persistence;
