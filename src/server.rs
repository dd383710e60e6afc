//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, migrations, token seeding and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::infrastructure::memory::MemoryStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Opens the PostgreSQL pool configured by `config` and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Builds the application state for the configured backend.
///
/// # Errors
///
/// Returns an error if the database cannot be prepared.
pub async fn build_state(config: &Config) -> Result<AppState> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory store, data is lost on exit");
        return Ok(AppState::memory(
            Arc::new(MemoryStore::new()),
            &config.public_dir,
        ));
    }

    let pool = connect_database(config).await?;
    Ok(AppState::postgres(Arc::new(pool), &config.public_dir))
}

/// Inserts `SEED_SECRET_TOKEN` into the token table if it is missing.
///
/// # Errors
///
/// Returns an error if the token table cannot be read or written.
pub async fn seed_token(state: &AppState, config: &Config) -> Result<()> {
    let Some(token) = &config.seed_secret_token else {
        return Ok(());
    };

    let created = state
        .auth_service
        .ensure_token(token)
        .await
        .context("Failed to seed API token")?;

    if created {
        tracing::info!("Seed API token created");
    } else {
        tracing::debug!("Seed API token already present");
    }

    Ok(())
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (or the memory store)
/// - Apply migrations
/// - Seed API token
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;
    seed_token(&state, &config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
