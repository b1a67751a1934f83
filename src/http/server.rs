//! HTTP server bootstrap.
//!
//! # Responsibilities
//! - Build the default router (request logging, panic recovery)
//! - Mount the `/api/v1` group and register the trends endpoints on it
//! - Bind the listener only once the route table is complete
//! - Surface bind failures as errors; the caller decides whether to exit

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::router::AppRouter;
use crate::trends::{TrendsHandler, TrendsService};

/// Prefix of the versioned API route group.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Errors that stop the server from reaching or staying in the serving state.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid bind address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// HTTP server for the insights API.
pub struct HttpServer {
    router: Router,
    routes: Vec<String>,
    config: ServiceConfig,
}

impl HttpServer {
    /// Assemble the full route table. Nothing is bound yet.
    pub fn new(config: ServiceConfig) -> Self {
        let mut app = AppRouter::with_default_middleware(Duration::from_secs(
            config.timeouts.request_secs,
        ));
        app.route("/health", get(health));

        let mut v1 = app.group(API_V1_PREFIX);

        let trends_service = Arc::new(TrendsService::new());
        let trends_handler = TrendsHandler::new(trends_service);
        trends_handler.register_routes(&mut v1);

        app.mount(v1);

        let routes = app.routes().to_vec();
        tracing::debug!(routes = ?routes, "Routes registered");

        Self {
            router: app.into_router(),
            routes,
            config,
        }
    }

    /// Every externally reachable route path.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// A clone of the assembled router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.listener.bind_address.clone();
        let addr: SocketAddr = address
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                address: address.clone(),
                source,
            })?;

        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { address, source })
    }

    /// Bind and serve until the process exits.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.run(listener).await
    }

    /// Serve on an already bound listener until the process exits.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        self.run_until(listener, std::future::pending()).await
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests and return.
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!(
            address = %addr,
            routes = self.routes.len(),
            "HTTP server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
