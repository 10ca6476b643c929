//! CLI administration tool for url-shortener.
//!
//! Runs the shortening engine directly against the configured store, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve aB3xY9zQ
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `url_shortener::config`). Without `DATABASE_URL`
//! the commands run against an empty in-memory store that lives only for
//! the duration of the command.

use url_shortener::application::services::UrlShortener;
use url_shortener::config::{self, Config};
use url_shortener::server::build_shortener;
use url_shortener::utils::url_validator::validate_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
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
    /// Shorten a URL and print its short link
    Shorten {
        /// URL to shorten
        url: String,
    },

    /// Print the original URL behind a short code
    Resolve {
        /// 8-character short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    url_shortener::logging::init("warn", &config.log_format);

    let shortener = build_shortener(&config)
        .await
        .context("Failed to initialize store")?;

    match cli.command {
        Commands::Shorten { url } => shorten(shortener, &config, &url).await?,
        Commands::Resolve { code } => resolve(shortener, &code).await?,
        Commands::Db { action } => handle_db_action(action, shortener, &config).await?,
    }

    Ok(())
}

/// Shortens a URL and prints the resulting short link.
async fn shorten(shortener: Arc<dyn UrlShortener>, config: &Config, url: &str) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = validate_url(url)?;

    let code = shortener
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  URL:   {}", url.cyan());
    println!("  Code:  {}", code.bright_yellow().bold());
    println!(
        "  Link:  {}",
        format!("{}{}", config.base_url, code).bright_green()
    );
    println!();

    Ok(())
}

/// Prints the original URL behind a short code.
async fn resolve(shortener: Arc<dyn UrlShortener>, code: &str) -> Result<()> {
    println!("{}", "🔍 Resolve Short Code".bright_blue().bold());
    println!();

    let original = shortener
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match original {
        Some(url) => {
            println!("  Code:  {}", code.bright_yellow());
            println!("  URL:   {}", url.cyan());
        }
        None => {
            println!("{}", format!("  No URL found for '{code}'").yellow());
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    shortener: Arc<dyn UrlShortener>,
    config: &Config,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            shortener
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Store check failed: {}", e))?;

            let store = if config.is_database_enabled() {
                "PostgreSQL"
            } else {
                "in-memory"
            };
            println!("{}", format!("✅ Store connection OK ({store})").green().bold());
        }
    }

    Ok(())
}
