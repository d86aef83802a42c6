//! HTTP handlers, grouped by resource.

pub mod carts;
pub mod products;
pub mod reviews;

use axum::response::IntoResponse;

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    "OK"
}
