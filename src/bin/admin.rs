//! CLI administration tool for URLchemy.
//!
//! Provides commands for creating and administering short URLs, viewing
//! statistics, and performing database operations without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- url create https://example.com --title "Example"
//!
//! # Inspect a record by its secret key
//! cargo run --bin admin -- url info S3CR7
//!
//! # Deactivate a record
//! cargo run --bin admin -- url deactivate S3CR7 -y
//!
//! # One record per target host
//! cargo run --bin admin -- url list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`urlchemy::config`].

use urlchemy::application::services::UrlService;
use urlchemy::config::{self, Config};
use urlchemy::infrastructure::persistence::SqliteUrlRepository;
use urlchemy::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;

/// CLI tool for managing URLchemy.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Shorten a URL
    Create {
        /// Target URL (absolute http or https)
        target_url: String,

        /// Title to store instead of fetching it
        #[arg(short, long)]
        title: Option<String>,

        /// Description to store instead of fetching it
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a record by its secret key
    Info {
        secret_key: String,
    },

    /// Deactivate a record by its secret key
    Deactivate {
        secret_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List one active record per target host
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &config, pool).await?,
        Commands::Stats => handle_stats(&config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short URL commands.
async fn handle_url_action(action: UrlAction, config: &Config, pool: SqlitePool) -> Result<()> {
    let service = server::build_url_service(config, pool)?;

    match action {
        UrlAction::Create {
            target_url,
            title,
            description,
        } => create_url(&service, target_url, title, description).await?,
        UrlAction::Info { secret_key } => show_url(&service, &secret_key).await?,
        UrlAction::Deactivate { secret_key, yes } => {
            deactivate_url(&service, &secret_key, yes).await?
        }
        UrlAction::List => list_urls(&service).await?,
    }

    Ok(())
}

/// Creates a short URL and prints both the public and the admin URL.
///
/// The admin URL is the only credential for the record: it is printed once
/// here and is not listed anywhere else.
async fn create_url(
    service: &UrlService<SqliteUrlRepository>,
    target_url: String,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short URL".bright_blue().bold());
    println!();

    let record = service
        .create(&target_url, title, description)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created successfully!".green().bold());
    println!();
    println!("  Target:      {}", record.target_url.cyan());
    println!(
        "  Title:       {}",
        record.title.as_deref().unwrap_or_default().bright_white()
    );
    println!(
        "  Short URL:   {}",
        service.short_url(&record.key).bright_green().bold()
    );
    println!(
        "  Admin URL:   {}",
        service.admin_url(&record.secret_key).bright_yellow().bold()
    );
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Keep the admin URL private. Anyone holding it can deactivate the link."
            .red()
            .bold()
    );
    println!();

    Ok(())
}

/// Prints a record's admin view.
async fn show_url(service: &UrlService<SqliteUrlRepository>, secret_key: &str) -> Result<()> {
    let record = service
        .admin_lookup(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "ℹ️  Short URL".bright_blue().bold());
    println!();
    println!("  Short URL:   {}", service.short_url(&record.key).cyan());
    println!("  Target:      {}", record.target_url.bright_white());
    println!(
        "  Title:       {}",
        record.title.as_deref().unwrap_or_default()
    );
    println!(
        "  Description: {}",
        record.description.as_deref().unwrap_or_default()
    );
    println!(
        "  Clicks:      {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:     {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Deactivates a record with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `-y` is given
/// - Deactivation cannot be undone
async fn deactivate_url(
    service: &UrlService<SqliteUrlRepository>,
    secret_key: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Deactivate Short URL".bright_blue().bold());
    println!();

    let record = service
        .admin_lookup(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Short URL: {}", service.short_url(&record.key).cyan());
    println!("  Target:    {}", record.target_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let message = service
        .deactivate(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate: {}", e))?;

    println!();
    println!("{}", format!("✅ {message}").green().bold());
    println!();

    Ok(())
}

/// Lists one active record per target host.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   Key      Clicks   Target
///   ──────────────────────────────────────────────
///   K3Y9A    12       https://example.com
/// ```
async fn list_urls(service: &UrlService<SqliteUrlRepository>) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let records = service
        .list_distinct_targets()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list short URLs: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No active short URLs".yellow());
        println!();
        println!(
            "  Create one with: {} admin url create <target>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<8} {:<8} {}",
        "Key".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<8} {:<8} {}",
            record.key.cyan(),
            record.clicks.to_string().bright_black(),
            record.target_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of short URLs
/// - Number of active short URLs
/// - Total number of clicks
async fn handle_stats(config: &Config, pool: SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = server::build_url_service(config, pool)?;
    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Short URLs: {}",
        summary.total.to_string().bright_green().bold()
    );
    println!(
        "  Active:     {}",
        summary.active.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:     {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            server::migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
