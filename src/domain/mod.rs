//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Record Lifecycle
//!
//! A URL record is created active with zero clicks. Successful resolves increment
//! its click counter; deactivation flips `is_active` to `false` exactly once and
//! is never reversed. Inactive records stay stored but are invisible to lookups.

pub mod entities;
pub mod repositories;
