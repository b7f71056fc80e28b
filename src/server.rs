//! HTTP server initialization and runtime setup.
//!
//! Builds the process-wide resources once, serves until a shutdown signal,
//! then tears them down.

use crate::application::services::UserService;
use crate::config::{Config, mask_connection_string};
use crate::infrastructure::cache::{CacheService, RedisCache};
use crate::infrastructure::persistence::PgUserRepository;
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

/// Opens the PostgreSQL pool described by `config`.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool
/// - Bundled migrations (unless `RUN_MIGRATIONS=false`)
/// - Redis cache client
/// - Axum HTTP server with graceful shutdown
///
/// Redis is required: startup fails rather than running without the cache.
///
/// # Errors
///
/// Returns an error if the database or Redis connection fails, a migration
/// fails, the listener cannot bind, or the server exits with an error.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply migrations")?;
        tracing::info!("Migrations applied");
    }

    let cache: Arc<dyn CacheService> = Arc::new(
        RedisCache::connect(&config.redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );

    let pool = Arc::new(pool);
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let user_service = Arc::new(UserService::new(
        user_repository,
        cache.clone(),
        config.users_cache_ttl(),
    ));

    let state = AppState::new(user_service, cache);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Database pool closed, shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
