//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries are
//! checked at runtime and mapped onto entities via `sqlx::FromRow`.
//!
//! # Repositories
//!
//! - [`SqliteUrlRepository`] - URL record storage, lookup and atomic mutation

pub mod sqlite_url_repository;

pub use sqlite_url_repository::SqliteUrlRepository;
