//! Channel trends subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request (/api/v1/channel/...)
//!     → handler.rs (extract path/query/body)
//!     → service.rs (validate, look up channel)
//!     → store.rs (ChannelRepository)
//!     → analytics.rs (pure computations)
//!     → JSON response (camelCase)
//! ```

pub mod analytics;
pub mod error;
pub mod handler;
pub mod service;
pub mod store;
pub mod types;

pub use error::{TrendsError, TrendsResult};
pub use handler::TrendsHandler;
pub use service::TrendsService;
pub use store::{ChannelRepository, InMemoryChannelRepository};
