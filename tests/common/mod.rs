#![allow(dead_code)]

use async_trait::async_trait;
use rand::Rng;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use urlchemy::application::services::UrlService;
use urlchemy::config::Config;
use urlchemy::domain::entities::PageMetadata;
use urlchemy::infrastructure::enrichment::{EnrichmentResult, MetadataEnricher};
use urlchemy::infrastructure::persistence::SqliteUrlRepository;
use urlchemy::server;
use urlchemy::state::AppState;
use urlchemy::utils::key_generator::KeyGenerator;

pub const BASE_URL: &str = "http://localhost:8000";

/// A migrated database file in the temp directory, removed on drop.
pub struct TestDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Pool settings as loaded from an empty environment, pointed at `path`.
pub fn test_config(path: &std::path::Path) -> Config {
    Config {
        database_url: format!("sqlite://{}", path.display()),
        base_url: BASE_URL.to_string(),
        env_name: "Test".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        key_length: 5,
        enrich_metadata: false,
        enrich_timeout_secs: 1,
        db_max_connections: 10,
        db_connect_timeout: 30,
        db_idle_timeout: 600,
        db_max_lifetime: 1800,
    }
}

/// Opens a fresh database through the same pool setup the server uses.
pub async fn test_db() -> TestDb {
    let name: u64 = rand::rng().random();
    let path = std::env::temp_dir().join(format!("urlchemy-test-{name:016x}.db"));

    let pool = server::connect_pool(&test_config(&path)).await.unwrap();
    server::migrate(&pool).await.unwrap();

    TestDb { pool, path }
}

/// Enricher returning fixed metadata without network access.
pub struct StubEnricher {
    pub metadata: PageMetadata,
}

impl StubEnricher {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            metadata: PageMetadata::new(Some(title.to_string()), Some(description.to_string())),
        }
    }
}

#[async_trait]
impl MetadataEnricher for StubEnricher {
    async fn fetch_metadata(&self, _url: &str) -> EnrichmentResult<PageMetadata> {
        Ok(self.metadata.clone())
    }
}

pub fn create_test_service(pool: SqlitePool) -> UrlService<SqliteUrlRepository> {
    UrlService::new(
        Arc::new(SqliteUrlRepository::new(Arc::new(pool))),
        Arc::new(StubEnricher::new("Stub title", "Stub description")),
        KeyGenerator::default(),
        Url::parse(BASE_URL).unwrap(),
        Duration::from_secs(1),
    )
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(create_test_service(pool)), "Test")
}

pub async fn create_test_url(pool: &SqlitePool, key: &str, secret_key: &str, target_url: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO urls ("key", secret_key, target_url, title, description)
        VALUES (?, ?, ?, 'Title', 'Description')
        RETURNING id
        "#,
    )
    .bind(key)
    .bind(secret_key)
    .bind(target_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_url(pool: &SqlitePool, key: &str, secret_key: &str, target_url: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO urls ("key", secret_key, target_url, is_active)
        VALUES (?, ?, ?, 0)
        RETURNING id
        "#,
    )
    .bind(key)
    .bind(secret_key)
    .bind(target_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn clicks_of(pool: &SqlitePool, key: &str) -> i64 {
    sqlx::query_scalar(r#"SELECT clicks FROM urls WHERE "key" = ?"#)
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn is_active(pool: &SqlitePool, key: &str) -> bool {
    sqlx::query_scalar(r#"SELECT is_active FROM urls WHERE "key" = ?"#)
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}
