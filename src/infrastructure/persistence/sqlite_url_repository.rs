//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const RECORD_COLUMNS: &str =
    r#"id, "key", secret_key, target_url, title, description, is_active, clicks, created_at"#;

/// SQLite repository for URL records.
///
/// Uniqueness of `key` and `secret_key` is enforced by table constraints. Click
/// increments and deactivation are single `UPDATE ... RETURNING` statements, so
/// concurrent callers never lose updates or observe a double transition.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO urls ("key", secret_key, target_url, title, description, is_active, clicks, created_at)
            VALUES (?, ?, ?, ?, ?, 1, 0, ?)
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, UrlRecord>(&sql)
            .bind(&new_record.key)
            .bind(&new_record.secret_key)
            .bind(&new_record.target_url)
            .bind(&new_record.title)
            .bind(&new_record.description)
            .bind(Utc::now())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!(
            r#"SELECT {RECORD_COLUMNS} FROM urls WHERE "key" = ? AND is_active = 1"#
        );

        let record = sqlx::query_as::<_, UrlRecord>(&sql)
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn find_by_secret(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql =
            format!("SELECT {RECORD_COLUMNS} FROM urls WHERE secret_key = ? AND is_active = 1");

        let record = sqlx::query_as::<_, UrlRecord>(&sql)
            .bind(secret_key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn key_exists(&self, candidate: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM urls WHERE "key" = ? OR secret_key = ?)"#,
        )
        .bind(candidate)
        .bind(candidate)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn increment_clicks(&self, id: i64) -> Result<UrlRecord, AppError> {
        let sql = format!(
            r#"
            UPDATE urls SET clicks = clicks + 1
            WHERE id = ? AND is_active = 1
            RETURNING {RECORD_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UrlRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Active URL record not found", json!({ "id": id })))
    }

    async fn deactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!(
            r#"
            UPDATE urls SET is_active = 0
            WHERE secret_key = ? AND is_active = 1
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, UrlRecord>(&sql)
            .bind(secret_key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn distinct_active_targets(&self) -> Result<Vec<UrlRecord>, AppError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM urls WHERE is_active = 1 ORDER BY id");

        let records = sqlx::query_as::<_, UrlRecord>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut seen_hosts = HashSet::new();

        Ok(records
            .into_iter()
            .filter(|record| match record.target_host() {
                Some(host) => seen_hosts.insert(host),
                None => false,
            })
            .collect())
    }

    async fn summary(&self) -> Result<UrlSummary, AppError> {
        let (total, active, clicks): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN is_active = 1 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(clicks), 0)
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlSummary {
            total,
            active,
            clicks,
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
