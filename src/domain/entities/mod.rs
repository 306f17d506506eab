//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short URL with its mutable state
//! - [`NewUrlRecord`] - Input for inserting a record
//! - [`PageMetadata`] - Title/description attached at creation time
//! - [`UrlSummary`] - Aggregate counters over the whole table

pub mod metadata;
pub mod url_record;

pub use metadata::PageMetadata;
pub use url_record::{NewUrlRecord, UrlRecord, UrlSummary};
