//! Metadata enricher trait and error types.

use crate::domain::entities::PageMetadata;
use async_trait::async_trait;

/// Errors that can occur while fetching page metadata.
///
/// These never reach API clients: the service logs them and stores placeholders.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Metadata request failed: {0}")]
    Request(String),

    #[error("Target responded with HTTP {0}")]
    Status(u16),

    #[error("Metadata fetch timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Request(e.to_string()),
        }
    }
}

/// Result type for enrichment operations.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

/// Trait for fetching best-effort metadata about a target page.
///
/// Implementations must be thread-safe. Callers bound every call with their own
/// timeout and treat any error as "no metadata".
///
/// # Implementations
///
/// - [`crate::infrastructure::enrichment::HttpMetadataEnricher`] - HTTP + HTML extraction
/// - [`crate::infrastructure::enrichment::NullEnricher`] - Always returns empty metadata
#[async_trait]
pub trait MetadataEnricher: Send + Sync {
    /// Fetches the title and description of the page at `url`.
    ///
    /// Missing fields are returned as `None`; only transport or HTTP status
    /// failures are errors.
    async fn fetch_metadata(&self, url: &str) -> EnrichmentResult<PageMetadata>;
}
