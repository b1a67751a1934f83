//! Lifecycle management.
//!
//! ```text
//! Initializing: HttpServer::new
//!     default router → /api/v1 group → trends service → handler → register routes
//! Serving: HttpServer::serve / run / run_until
//!     bind listener → accept until the process exits (or shutdown resolves)
//! ```
//!
//! The listener is bound only after the router is complete, so no request
//! can observe a partially registered route table.

pub mod shutdown;

pub use shutdown::Shutdown;
