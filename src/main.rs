//! Channel insights API server.
//!
//! ```text
//! default router (trace, request id, panic recovery)
//!     ├── /health
//!     └── /api/v1 ──▶ TrendsHandler ──▶ TrendsService ──▶ channel catalog
//! ```
//!
//! Listens on `0.0.0.0:8080`. A bind failure is logged and the process exits
//! with status 1.

use insights_api::config::ServiceConfig;
use insights_api::http::HttpServer;
use insights_api::observability::{logging, metrics};

#[tokio::main]
async fn main() {
    let config = ServiceConfig::default();
    logging::init_logging(&config.observability);

    tracing::info!("insights-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config);
    if let Err(e) = server.serve().await {
        tracing::error!(error = %e, "Failed to start server");
        std::process::exit(1);
    }
}
