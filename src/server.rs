//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections, migrations and the Axum
//! server lifecycle.

use crate::application::services::{ShortenService, UrlShortener};
use crate::config::Config;
use crate::infrastructure::persistence::{
    MemoryStore, MemoryUrlRepository, PgSessionProvider, PgUrlRepository,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the shortening engine for the configured store.
///
/// With a database URL this connects a PostgreSQL pool and applies
/// migrations; otherwise records live in process memory.
///
/// # Errors
///
/// Returns an error if the database connection or a migration fails.
pub async fn build_shortener(config: &Config) -> Result<Arc<dyn UrlShortener>> {
    let generator = Arc::new(RandomCodeGenerator::from_os_rng());

    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, records are kept in memory");
        let service = ShortenService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryUrlRepository::new()),
            generator,
        )
        .with_max_code_attempts(config.code_max_attempts);
        return Ok(Arc::new(service));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let service = ShortenService::new(
        Arc::new(PgSessionProvider::new(Arc::new(pool))),
        Arc::new(PgUrlRepository::new()),
        generator,
    )
    .with_max_code_attempts(config.code_max_attempts);

    Ok(Arc::new(service))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Store initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let shortener = build_shortener(&config).await?;
    let state = AppState::new(shortener, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
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
        return;
    }
    tracing::info!("Shutdown signal received");
}
