//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, the session store, and the Axum server lifecycle.

use crate::application::services::TokenService;
use crate::application::services::token_service::TokenSettings;
use crate::config::Config;
use crate::infrastructure::persistence::{PgCalculationRepository, PgUserRepository};
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::routes::{RateLimit, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use chrono::TimeDelta;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis token blacklist (or in-memory fallback)
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

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let sessions = session_store(&config).await;

    let access_ttl = TimeDelta::try_minutes(config.access_token_expire_minutes)
        .context("ACCESS_TOKEN_EXPIRE_MINUTES is out of range")?;
    let refresh_ttl = TimeDelta::try_days(config.refresh_token_expire_days)
        .context("REFRESH_TOKEN_EXPIRE_DAYS is out of range")?;

    let tokens = Arc::new(TokenService::new(
        TokenSettings {
            access_secret: config.jwt_secret_key.clone(),
            refresh_secret: config.jwt_refresh_secret_key.clone(),
            access_ttl,
            refresh_ttl,
        },
        sessions,
    ));

    let pool = Arc::new(pool);
    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgCalculationRepository::new(pool.clone())),
        tokens,
        config.cookie_secure,
    );

    let rate_limit = match (config.rate_limit_enabled, config.behind_proxy) {
        (false, _) => RateLimit::Disabled,
        (true, false) => RateLimit::PeerIp,
        (true, true) => RateLimit::Proxied,
    };

    let app = app_router(state, rate_limit);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Builds the connection pool from the `DB_*` pool settings.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn session_store(config: &Config) -> Arc<dyn SessionStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Token blacklist: in-memory");
        return Arc::new(MemorySessionStore::new());
    };

    match RedisSessionStore::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Token blacklist: Redis");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using in-memory blacklist.", e);
            Arc::new(MemorySessionStore::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
