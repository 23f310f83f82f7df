//! # Handlers
//!
//! One module per resource. Each handler unpacks the request, calls a
//! single service operation and wraps the result under its response key.

pub mod api;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Response for unmatched paths and methods.
pub async fn invalid_endpoint() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Invalid Endpoint")
}
