//! TISS API Server Binary
//!
//! Starts the HTTP API for TISS claim document generation.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin tiss-api
//!
//! # Run with environment variables
//! API_PORT=8080 DATABASE_URL=postgres://... API_TISS__SCHEMA_DIR=/var/lib/tiss cargo run --bin tiss-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `DATABASE_URL` / `API_DATABASE__URL` - PostgreSQL connection string
//! * `API_DATABASE__RUN_MIGRATIONS` - Apply embedded migrations at startup (default: true)
//! * `API_TISS__SCHEMA_DIR` - Directory holding the TISS XSD (default: schemas)
//! * `API_TISS__OFFICIAL_SCHEMA_URL` - Where to download the official XSD from

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_tiss::TissService;
use infra_db::{create_pool, run_migrations, PostgresClaimsDataAdapter};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Loads configuration, prepares the database and the TISS schema, then
/// serves until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        schema_path = %config.tiss.schema_path().display(),
        "Starting TISS API server"
    );

    let pool = create_pool(&config.database).context("invalid database configuration")?;
    if config.database.run_migrations {
        run_migrations(&pool).await.context("database migrations failed")?;
    }

    let adapter = Arc::new(PostgresClaimsDataAdapter::new(pool));
    let tiss = Arc::new(TissService::new(adapter, config.tiss.clone()));

    // Provision once, before accepting requests
    let origin = tiss.ensure_ready().await.context("TISS schema provisioning failed")?;
    tracing::info!(?origin, "TISS schema ready");

    let app = create_router(tiss, config.clone());

    let addr: SocketAddr = config.server_addr().parse().context("invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
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
