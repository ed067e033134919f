//! Finance Manager - API Server Binary
//!
//! Starts the HTTP API server for the personal finance manager.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin finance-api
//!
//! # Run with environment variables
//! FINANCE_PORT=8080 FINANCE_DATABASE_URL=postgres://... cargo run --bin finance-api
//! ```
//!
//! # Environment Variables
//!
//! * `FINANCE_HOST` - Server host (default: 0.0.0.0)
//! * `FINANCE_PORT` - Server port (default: 3001)
//! * `FINANCE_DATABASE_URL` - PostgreSQL connection string
//! * `FINANCE_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `FINANCE_JWT_SECRET` - Token signing secret (required in production)
//! * `FINANCE_JWT_EXPIRATION_SECS` - Token validity (default: 7 days)
//! * `FINANCE_LOG_LEVEL` - Used when `RUST_LOG` is unset (default: info)
//! * `FINANCE_LOG_FORMAT` - `text` or `json` (default: text)
//! * `FINANCE_TIMEZONE` - IANA zone defining "today" (default: America/Sao_Paulo)
//! * `FINANCE_PUBLIC_URL` - Web client URL used in password reset links

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %config.timezone,
        "Starting Finance Manager API Server"
    );

    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()).max_connections(config.db_max_connections),
    )
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    let state = AppState::postgres(pool, config).context("invalid timezone")?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Installs the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can finish
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
