//! Channel insights API library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod trends;

pub use config::ServiceConfig;
pub use http::{HttpServer, ServerError};
pub use lifecycle::Shutdown;
