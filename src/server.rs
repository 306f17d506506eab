//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum server
//! lifecycle.

use crate::application::services::UrlService;
use crate::config::Config;
use crate::infrastructure::enrichment::{HttpMetadataEnricher, MetadataEnricher, NullEnricher};
use crate::infrastructure::persistence::SqliteUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_generator::KeyGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the SQLite pool described by `config`, creating the database file if
/// needed.
///
/// Connections use WAL journaling so redirects keep reading while a click or
/// deactivation writes. Writers wait for the lock up to `db_connect_timeout`
/// instead of failing with `SQLITE_BUSY`.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
pub async fn connect_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{}'", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.db_connect_timeout));

    if let Some(parent) = options.get_filename().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Applies the embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")
}

/// Builds the metadata enricher: HTTP when enabled, otherwise a no-op.
///
/// A client that cannot be built falls back to the no-op enricher so the
/// service still starts.
pub fn build_enricher(config: &Config) -> Arc<dyn MetadataEnricher> {
    if !config.enrich_metadata {
        tracing::info!("Metadata enrichment disabled (NullEnricher)");
        return Arc::new(NullEnricher::new());
    }

    match HttpMetadataEnricher::new(Duration::from_secs(config.enrich_timeout_secs)) {
        Ok(enricher) => {
            tracing::info!("Metadata enrichment enabled (HTTP)");
            Arc::new(enricher)
        }
        Err(e) => {
            tracing::warn!("Failed to build HTTP client: {}. Using NullEnricher.", e);
            Arc::new(NullEnricher::new())
        }
    }
}

/// Builds the URL service on top of an open pool.
///
/// # Errors
///
/// Returns an error if `BASE_URL` cannot be parsed.
pub fn build_url_service(
    config: &Config,
    pool: SqlitePool,
) -> Result<UrlService<SqliteUrlRepository>> {
    let repository = Arc::new(SqliteUrlRepository::new(Arc::new(pool)));

    Ok(UrlService::new(
        repository,
        build_enricher(config),
        KeyGenerator::new(config.key_length),
        config.parsed_base_url()?,
        Duration::from_secs(config.enrich_timeout_secs),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Metadata enricher (or NullEnricher fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    migrate(&pool).await?;
    tracing::info!("Migrations applied");

    let url_service = build_url_service(&config, pool)?;
    let state = AppState::new(Arc::new(url_service), &config.env_name);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
