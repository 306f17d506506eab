//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// Implementations must enforce uniqueness of `key` and `secret_key` themselves
/// and perform click increments and deactivation as single atomic statements, so
/// callers never need to pre-check or lock.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new active record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `key` or `secret_key` is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds an active record by its public key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if an active record matches
    /// - `Ok(None)` if no record matches or it has been deactivated
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds an active record by its secret key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_secret(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns true if `candidate` is used as a key or a secret key by any record,
    /// active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn key_exists(&self, candidate: &str) -> Result<bool, AppError>;

    /// Atomically increments the click counter of an active record and returns
    /// the updated record.
    ///
    /// The active check and the increment are one statement, so a record
    /// deactivated after it was looked up never gains a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record has this id.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<UrlRecord, AppError>;

    /// Atomically flips `is_active` from `true` to `false`.
    ///
    /// Returns the deactivated record, or `Ok(None)` if no record has this secret
    /// key or it was already inactive. Of several concurrent calls on the same
    /// secret key, exactly one observes `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns the first active record (by id) for every distinct target host.
    ///
    /// Records whose target URL has no parseable host are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the underlying table does not exist.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn distinct_active_targets(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts records and clicks across the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn summary(&self) -> Result<UrlSummary, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    async fn health_check(&self) -> Result<(), AppError>;
}
