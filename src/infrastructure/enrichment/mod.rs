//! Page metadata enrichment consulted when a short URL is created.
//!
//! Provides a [`MetadataEnricher`] trait with two implementations:
//! - [`HttpMetadataEnricher`] - Fetches the target page and extracts title/description
//! - [`NullEnricher`] - No-op implementation for tests or disabled enrichment

mod http_enricher;
mod null_enricher;
mod service;

pub use http_enricher::{HttpMetadataEnricher, MAX_BODY_BYTES, extract_metadata, read_html_head};
pub use null_enricher::NullEnricher;
pub use service::{EnrichmentError, EnrichmentResult, MetadataEnricher};
