//! # api-adapters
//!
//! The HTTP surface of Newsdesk. Handlers translate requests into service
//! calls and service results into JSON; they hold no business rules.

pub mod endpoints;
pub mod metrics;

#[cfg(feature = "web-axum")]
pub mod errors;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod router;
#[cfg(feature = "web-axum")]
pub mod state;

pub use metrics::Metrics;

#[cfg(feature = "web-axum")]
pub use errors::ApiError;
#[cfg(feature = "web-axum")]
pub use router::build_router;
#[cfg(feature = "web-axum")]
pub use state::AppState;
