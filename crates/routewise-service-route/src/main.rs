//! Routewise travel HTTP service binary.
//!
//! # Configuration
//!
//! - `ROUTEWISE_DB` - Path to the SQLite database (default: platform data dir)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` - Set to "false" to disable the Prometheus recorder

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use routewise_lib::resolve_database_path;
use routewise_service_route::app;
use routewise_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let db_path = resolve_database_path(None)?;
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(db_path = %db_path.display(), port, "starting route service");

    let state = AppState::load(&db_path).map_err(|e| {
        error!(error = %e, path = %db_path.display(), "failed to load application state");
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
