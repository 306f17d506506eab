//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://data/urls.db`)
//! - `BASE_URL` - Public origin short URLs are built on (default: `http://localhost:8000`)
//! - `ENV_NAME` - Environment label reported by `/health` (default: `Local`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `KEY_LENGTH` - Length of generated keys, 4 to 32 (default: 5)
//! - `ENRICH_METADATA` - Fetch missing titles and descriptions (default: `true`)
//! - `ENRICH_TIMEOUT_SECS` - Metadata fetch timeout (default: 5)
//!
//! ## Pool Variables
//!
//! - `DB_MAX_CONNECTIONS` (default: 10)
//! - `DB_CONNECT_TIMEOUT` seconds (default: 30)
//! - `DB_IDLE_TIMEOUT` seconds (default: 600)
//! - `DB_MAX_LIFETIME` seconds (default: 1800)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use url::Url;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/urls.db";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Accepted range for `KEY_LENGTH`.
pub const KEY_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=32;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub base_url: String,
    pub env_name: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub key_length: usize,
    /// When false, missing titles and descriptions go straight to placeholders.
    pub enrich_metadata: bool,
    pub enrich_timeout_secs: u64,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Idle connection lifetime in seconds before it is closed
    /// (`DB_IDLE_TIMEOUT`, default: 600).
    pub db_idle_timeout: u64,
    /// Maximum connection lifetime in seconds (`DB_MAX_LIFETIME`, default: 1800).
    pub db_max_lifetime: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let env_name = env::var("ENV_NAME").unwrap_or_else(|_| "Local".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let key_length = parse_var("KEY_LENGTH", 5)?;
        let enrich_metadata = parse_bool_var("ENRICH_METADATA", true)?;
        let enrich_timeout_secs = parse_var("ENRICH_TIMEOUT_SECS", 5)?;

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 10)?;
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT", 30)?;
        let db_idle_timeout = parse_var("DB_IDLE_TIMEOUT", 600)?;
        let db_max_lifetime = parse_var("DB_MAX_LIFETIME", 1800)?;

        Ok(Self {
            database_url,
            base_url,
            env_name,
            listen_addr,
            log_level,
            log_format,
            key_length,
            enrich_metadata,
            enrich_timeout_secs,
            db_max_connections,
            db_connect_timeout,
            db_idle_timeout,
            db_max_lifetime,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an absolute HTTP(S) URL
    /// - `key_length` is outside 4..=32
    /// - a timeout or pool size is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        let base_url = self.parsed_base_url()?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            anyhow::bail!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            );
        }

        if !KEY_LENGTH_RANGE.contains(&self.key_length) {
            anyhow::bail!(
                "KEY_LENGTH must be between {} and {}, got {}",
                KEY_LENGTH_RANGE.start(),
                KEY_LENGTH_RANGE.end(),
                self.key_length
            );
        }

        if self.enrich_timeout_secs == 0 {
            anyhow::bail!("ENRICH_TIMEOUT_SECS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Parses `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `BASE_URL` is not a valid URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env_name);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Key length: {}", self.key_length);

        if self.enrich_metadata {
            tracing::info!(
                "  Metadata enrichment: enabled (timeout {}s)",
                self.enrich_timeout_secs
            );
        } else {
            tracing::info!("  Metadata enrichment: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{value}'")),
        Err(_) => Ok(default),
    }
}

fn parse_bool_var(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{name} must be a boolean, got '{value}'"),
        },
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
