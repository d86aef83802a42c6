//! Review routes for the product detail page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cheapware_core::{NewReview, Review};
use tracing::debug;

use crate::dto::{ReviewsResponse, VoteRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<u64>,
) -> ApiResult<Json<ReviewsResponse>> {
    // 404 for unknown products rather than an empty list
    state.store.products().get(product_id).await?;

    let (reviews, summary) = state.store.reviews().list_with_summary(product_id).await;
    debug!(product_id, count = reviews.len(), "Returning reviews");

    Ok(Json(ReviewsResponse { reviews, summary }))
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<u64>,
    ApiJson(payload): ApiJson<NewReview>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let _guard = state.lock_catalog().await;
    state.store.products().get(product_id).await?;

    let review = state.store.reviews().add(product_id, payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn vote_review(
    State(state): State<Arc<AppState>>,
    ApiPath(review_id): ApiPath<u64>,
    ApiJson(vote): ApiJson<VoteRequest>,
) -> ApiResult<Json<Review>> {
    let review = state.store.reviews().vote(review_id, vote.kind).await?;
    Ok(Json(review))
}
