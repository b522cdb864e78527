//! HTTP layer exposing the collector to a monitoring scraper.
//!
//! Every inbound scrape of `/metrics` triggers exactly one collection; the
//! resulting samples are serialized into the Prometheus text exposition
//! format. A landing page on `/` links to the metrics endpoint.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{ExporterError, Result};
use crate::metrics::SensorCollector;
use crate::sensor::SensorPort;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Start the metrics endpoint server.
///
/// Binds the configured address and serves until the process is stopped.
/// A bind failure is returned to the caller and is boot-fatal for the
/// exporter binary.
pub async fn start_web_server<S>(
    config: WebConfig,
    collector: Arc<SensorCollector<S>>,
) -> Result<()>
where
    S: SensorPort + Send + 'static,
{
    let app = create_app(collector)?;

    let addr = config
        .listen
        .parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("invalid listen address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("failed to bind {}: {}", addr, e)))?;

    info!("Starting server listening on http://{}", addr);
    info!("Metrics endpoint: http://{}/metrics", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("server error: {}", e)))?;

    Ok(())
}
