//! URL record entity, the only persisted entity of the service.

use chrono::{DateTime, Utc};
use url::Url;

/// A shortened URL with its public key, secret admin key and mutable state.
///
/// `key` and `secret_key` are immutable once assigned. `is_active` only ever
/// transitions from `true` to `false`, and `clicks` never decreases.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Returns the host of the target URL, lowercased, or `None` if the stored
    /// value cannot be parsed.
    ///
    /// Used to group records by target domain.
    pub fn target_host(&self) -> Option<String> {
        Url::parse(&self.target_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }
}

/// Input data for inserting a new record.
///
/// The store assigns `id` and `created_at`; new records are always active with
/// zero clicks.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Aggregate counters over all stored records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlSummary {
    pub total: i64,
    pub active: i64,
    pub clicks: i64,
}
