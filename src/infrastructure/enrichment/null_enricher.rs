//! No-op enricher for tests or disabled enrichment.

use super::service::{EnrichmentResult, MetadataEnricher};
use crate::domain::entities::PageMetadata;
use async_trait::async_trait;
use tracing::debug;

/// An enricher that never performs network calls.
///
/// Used when `ENRICH_METADATA=false`. Every record gets placeholder metadata
/// unless the client supplied its own title and description.
pub struct NullEnricher;

impl NullEnricher {
    /// Creates a new NullEnricher instance.
    pub fn new() -> Self {
        debug!("Using NullEnricher (metadata enrichment disabled)");
        Self
    }
}

impl Default for NullEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataEnricher for NullEnricher {
    async fn fetch_metadata(&self, _url: &str) -> EnrichmentResult<PageMetadata> {
        Ok(PageMetadata::default())
    }
}
