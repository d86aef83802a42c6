//! # Cheapware Storefront API
//!
//! JSON over HTTP for the storefront web app and its admin panel.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /health                                                                │
//! │  /api/products[/featured|/facets|/{id}|/{id}/related]    catalog, admin │
//! │  /api/products/{id}/reviews, /api/reviews/{id}/vote      reviews        │
//! │  /api/carts[/{id}[/items[/{product_id}]|/checkout]]      cart, checkout │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let state = Arc::new(AppState::new(Store::in_memory(), CheckoutSettings::default()));
//! let app = build_router(state, &[]);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub use crate::config::StorefrontConfig;
pub use crate::error::{ApiError, ApiResult, ErrorCode};
pub use crate::state::AppState;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,cheapware=debug,storefront_api=debug,tower_http=info";

/// Builds the full router.
///
/// An empty `cors_origins` list allows any origin.
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api = Router::new()
        // Catalog and admin
        .route(
            "/api/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route("/api/products/featured", get(routes::products::featured_products))
        .route("/api/products/facets", get(routes::products::product_facets))
        .route(
            "/api/products/{id}",
            get(routes::products::get_product)
                .put(routes::products::update_product)
                .delete(routes::products::delete_product),
        )
        .route("/api/products/{id}/related", get(routes::products::related_products))
        // Reviews
        .route(
            "/api/products/{id}/reviews",
            get(routes::reviews::list_reviews).post(routes::reviews::create_review),
        )
        .route("/api/reviews/{id}/vote", post(routes::reviews::vote_review))
        // Carts
        .route("/api/carts", post(routes::carts::create_cart))
        .route("/api/carts/{id}", get(routes::carts::get_cart))
        .route(
            "/api/carts/{id}/items",
            post(routes::carts::add_item).delete(routes::carts::clear_cart),
        )
        .route(
            "/api/carts/{id}/items/{product_id}",
            put(routes::carts::update_item).delete(routes::carts::remove_item),
        )
        .route("/api/carts/{id}/checkout", post(routes::carts::checkout));

    Router::new()
        .route("/health", get(routes::health))
        .merge(api)
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over the built-in filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
