//! # Product Routes
//!
//! Catalog browsing for shoppers and CRUD for the admin panel.
//!
//! ## Endpoints
//! ```text
//! GET    /api/products              list (filters, sort) or ?id=N for one
//! POST   /api/products              create            → 201
//! GET    /api/products/featured     home page carousel
//! GET    /api/products/facets       filter sheet values
//! GET    /api/products/{id}         detail
//! PUT    /api/products/{id}         partial update
//! DELETE /api/products/{id}         delete            → 204
//! GET    /api/products/{id}/related "You may also like"
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cheapware_core::{NewProduct, ProductPatch, RELATED_PRODUCTS_LIMIT};
use tracing::{debug, info};

use crate::dto::{FacetsResponse, ProductDto, ProductListParams, RelatedParams};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Lists products, or returns one when `?id=` is given.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ProductListParams>,
) -> ApiResult<Response> {
    debug!(?params, "list_products called");

    if let Some(id) = params.product_id()? {
        let product = state.store.products().get(id).await?;
        return Ok(Json(ProductDto::from(product)).into_response());
    }

    let query = params.to_query()?;
    let products: Vec<ProductDto> = state
        .store
        .products()
        .list(&query)
        .await
        .into_iter()
        .map(ProductDto::from)
        .collect();

    debug!(count = products.len(), "Returning products");
    Ok(Json(products).into_response())
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewProduct>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    debug!(name = ?payload.name, "create_product called");

    let product = state.store.products().insert(payload).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn featured_products(State(state): State<Arc<AppState>>) -> Json<Vec<ProductDto>> {
    let products = state.store.products().featured().await;
    Json(products.into_iter().map(ProductDto::from).collect())
}

pub async fn product_facets(State(state): State<Arc<AppState>>) -> Json<FacetsResponse> {
    Json(state.store.products().facets().await.into())
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Json<ProductDto>> {
    debug!(id, "get_product called");
    let product = state.store.products().get(id).await?;
    Ok(Json(product.into()))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<ProductDto>> {
    debug!(id, "update_product called");
    let product = state.store.products().update(id, patch).await?;
    Ok(Json(product.into()))
}

/// Deletes a product and its reviews.
///
/// Carts that already hold the product keep their snapshot line.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<StatusCode> {
    debug!(id, "delete_product called");

    let _guard = state.lock_catalog().await;
    state.store.products().delete(id).await?;
    let reviews = state.store.reviews().remove_for_product(id).await;

    info!(id, reviews, "Product removed from catalog");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn related_products(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
    ApiQuery(params): ApiQuery<RelatedParams>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let limit = params
        .limit
        .unwrap_or(RELATED_PRODUCTS_LIMIT)
        .min(cheapware_core::MAX_LIST_LIMIT);

    let related = state.store.products().related(id, limit).await?;
    Ok(Json(related.into_iter().map(ProductDto::from).collect()))
}
