//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, bind/serve lifecycle)
//!     → middleware.rs (request ID, access log, metrics, panic recovery, timeout)
//!     → router.rs (AppRouter + RouteGroup prefix matching)
//!     → domain handler (trends)
//! ```

pub mod middleware;
pub mod request;
pub mod router;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use router::{AppRouter, RouteGroup};
pub use server::{HttpServer, ServerError, API_V1_PREFIX};
