//! Short URL creation, resolution and administration service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::entities::{NewUrlRecord, PageMetadata, UrlRecord, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::enrichment::{EnrichmentError, MetadataEnricher};
use crate::utils::key_generator::KeyGenerator;
use crate::utils::url_validator::validate_target_url;

/// Total insert attempts when generated keys collide at insert time.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Pause between insert attempts.
const CREATE_RETRY_DELAY_MS: u64 = 10;

/// Service for creating, resolving and administering short URLs.
///
/// Every record carries a public `key` used for redirects and a `secret_key`
/// that acts as a bearer credential for its admin operations. Both come from
/// independent draws of the same [`KeyGenerator`] and are never equal.
///
/// Consistency under concurrency is delegated to the repository: uniqueness is
/// enforced at insert, click increments and deactivation are atomic.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    enricher: Arc<dyn MetadataEnricher>,
    key_generator: KeyGenerator,
    base_url: Url,
    enrich_timeout: Duration,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// `base_url` is the public origin short URLs and admin URLs are built on;
    /// `enrich_timeout` bounds every metadata fetch.
    pub fn new(
        repository: Arc<R>,
        enricher: Arc<dyn MetadataEnricher>,
        key_generator: KeyGenerator,
        base_url: Url,
        enrich_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            enricher,
            key_generator,
            base_url,
            enrich_timeout,
        }
    }

    /// Creates a new short URL for `target_url`.
    ///
    /// Title and description supplied by the caller are stored as given. If
    /// either is missing, the metadata enricher is consulted (bounded by the
    /// configured timeout); anything it cannot provide is replaced with
    /// placeholders. Enrichment never fails the creation.
    ///
    /// # Key Allocation
    ///
    /// - `key` and `secret_key` are drawn until unused by any record
    /// - A draw equal to the already chosen `key` is discarded
    /// - If the insert still hits a unique constraint (concurrent create), the
    ///   whole allocation is retried, up to 3 attempts in total
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target_url` is not an absolute HTTP(S) URL.
    /// Returns [`AppError::Conflict`] if every insert attempt collided.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(
        &self,
        target_url: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        let target_url = validate_target_url(target_url).map_err(|e| {
            AppError::bad_request(
                "Your provided URL is not valid",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let given = PageMetadata::new(non_blank(title), non_blank(description));
        let metadata = self.enrich(&target_url, given).await;

        let strategy =
            FixedInterval::from_millis(CREATE_RETRY_DELAY_MS).take(MAX_CREATE_ATTEMPTS - 1);

        let record = RetryIf::spawn(
            strategy,
            || self.try_insert(&target_url, &metadata),
            |e: &AppError| {
                let retry = matches!(e, AppError::Conflict { .. });
                if retry {
                    warn!(error = %e, "Key collision on insert, retrying");
                }
                retry
            },
        )
        .await
        .map_err(|e| match e {
            AppError::Conflict { .. } => AppError::conflict(
                "Could not allocate a unique key",
                json!({ "attempts": MAX_CREATE_ATTEMPTS }),
            ),
            other => other,
        })?;

        info!(id = record.id, key = %record.key, "Created short URL");
        Ok(record)
    }

    /// Resolves a key to its target URL and counts the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record has this key.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, key: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| key_not_found(key))?;

        // Deactivated between lookup and increment.
        let record = self
            .repository
            .increment_clicks(record.id)
            .await
            .map_err(|e| match e {
                AppError::NotFound { .. } => key_not_found(key),
                other => other,
            })?;
        debug!(key, clicks = record.clicks, "Resolved short URL");

        Ok(record.target_url)
    }

    /// Looks up the record a secret key administers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record has this secret key.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn admin_lookup(&self, secret_key: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_secret(secret_key)
            .await?
            .ok_or_else(|| secret_not_found(secret_key))
    }

    /// Deactivates the record a secret key administers.
    ///
    /// Returns a confirmation message naming the deactivated target. A second
    /// call with the same secret key fails: deactivation is reported once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this secret key or it is
    /// already inactive.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn deactivate(&self, secret_key: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .deactivate(secret_key)
            .await?
            .ok_or_else(|| secret_not_found(secret_key))?;

        info!(id = record.id, key = %record.key, "Deactivated short URL");

        Ok(format!(
            "Successfully deleted shortened URL for '{}'",
            record.target_url
        ))
    }

    /// Returns one active record per distinct target host, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the underlying table does not exist.
    /// Returns [`AppError::Internal`] on other database errors.
    pub async fn list_distinct_targets(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.distinct_active_targets().await
    }

    /// Returns aggregate record and click counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<UrlSummary, AppError> {
        self.repository.summary().await
    }

    /// Checks that the underlying store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.health_check().await
    }

    /// Builds the public short URL for a key: the base URL with its path
    /// replaced by the key.
    pub fn short_url(&self, key: &str) -> String {
        self.url_with_path(key)
    }

    /// Builds the admin URL for a secret key.
    pub fn admin_url(&self, secret_key: &str) -> String {
        self.url_with_path(&format!("admin/{secret_key}"))
    }

    fn url_with_path(&self, path: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        url.to_string()
    }

    /// Fills missing metadata from the enricher, then from placeholders.
    async fn enrich(&self, target_url: &str, given: PageMetadata) -> PageMetadata {
        if given.is_complete() {
            return given;
        }

        let fetched =
            match tokio::time::timeout(self.enrich_timeout, self.enricher.fetch_metadata(target_url))
                .await
            {
                Ok(Ok(metadata)) => metadata,
                Ok(Err(e)) => {
                    warn!(target_url, error = %e, "Metadata enrichment failed");
                    PageMetadata::default()
                }
                Err(_) => {
                    let e = EnrichmentError::Timeout(self.enrich_timeout.as_secs());
                    warn!(target_url, error = %e, "Metadata enrichment failed");
                    PageMetadata::default()
                }
            };

        given.merge(fetched).or_placeholders()
    }

    /// Allocates a fresh key pair and inserts one record.
    async fn try_insert(
        &self,
        target_url: &str,
        metadata: &PageMetadata,
    ) -> Result<UrlRecord, AppError> {
        let key = self.unique_key().await?;

        let secret_key = loop {
            let candidate = self.unique_key().await?;
            if candidate != key {
                break candidate;
            }
        };

        self.repository
            .insert(NewUrlRecord {
                key,
                secret_key,
                target_url: target_url.to_string(),
                title: metadata.title.clone(),
                description: metadata.description.clone(),
            })
            .await
    }

    async fn unique_key(&self) -> Result<String, AppError> {
        let repository = &self.repository;

        self.key_generator
            .generate_unique_key_async(|candidate| async move {
                repository.key_exists(&candidate).await
            })
            .await
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn key_not_found(key: &str) -> AppError {
    AppError::not_found(
        format!("Short URL '{key}' not found"),
        json!({ "key": key }),
    )
}

fn secret_not_found(secret_key: &str) -> AppError {
    AppError::not_found(
        format!("Admin URL for '{secret_key}' not found or inactive"),
        json!({ "secret_key": secret_key }),
    )
}
