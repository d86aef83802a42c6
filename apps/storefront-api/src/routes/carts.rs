//! # Cart Routes
//!
//! ## Cart Lifecycle
//! ```text
//! POST /api/carts ──► { id } ──► stored by the browser
//!      │
//!      ▼
//! POST   /api/carts/{id}/items              add (quantity defaults to 1)
//! PUT    /api/carts/{id}/items/{product}    set quantity, ≤0 removes
//! DELETE /api/carts/{id}/items/{product}    remove line
//! DELETE /api/carts/{id}/items              clear
//!      │
//!      ▼
//! POST /api/carts/{id}/checkout ──► { message, url } ──► open WhatsApp
//! ```
//!
//! Every mutating route answers with the whole cart and its totals so the
//! badge and order summary can refresh from one response.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cheapware_core::checkout::{self, CheckoutLink};
use cheapware_core::Cart;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::{AddItemRequest, CartResponse, UpdateQuantityRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub async fn create_cart(State(state): State<Arc<AppState>>) -> ApiResult<(StatusCode, Json<CartResponse>)> {
    let id = Uuid::new_v4();
    let cart = Cart::new();
    state.store.carts().save(id, &cart).await?;

    info!(%id, "Cart created");
    Ok((StatusCode::CREATED, Json(CartResponse::new(id, cart))))
}

pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<CartResponse>> {
    let cart = state.cart(id).await?;
    Ok(Json(CartResponse::new(id, cart)))
}

pub async fn add_item(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> ApiResult<Json<CartResponse>> {
    debug!(%id, product_id = req.product_id, quantity = req.quantity, "add_item called");

    let product = state.store.products().get(req.product_id).await?;
    let cart = state
        .with_cart_mut(id, |cart| cart.add_item(&product, req.quantity))
        .await?;

    Ok(Json(CartResponse::new(id, cart)))
}

pub async fn update_item(
    State(state): State<Arc<AppState>>,
    ApiPath((id, product_id)): ApiPath<(Uuid, u64)>,
    ApiJson(req): ApiJson<UpdateQuantityRequest>,
) -> ApiResult<Json<CartResponse>> {
    debug!(%id, product_id, quantity = req.quantity, "update_item called");

    let cart = state
        .with_cart_mut(id, |cart| cart.update_quantity(product_id, req.quantity))
        .await?;

    Ok(Json(CartResponse::new(id, cart)))
}

pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    ApiPath((id, product_id)): ApiPath<(Uuid, u64)>,
) -> ApiResult<Json<CartResponse>> {
    debug!(%id, product_id, "remove_item called");

    let cart = state
        .with_cart_mut(id, |cart| cart.remove_item(product_id))
        .await?;

    Ok(Json(CartResponse::new(id, cart)))
}

pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<CartResponse>> {
    let cart = state
        .with_cart_mut(id, |cart| {
            cart.clear();
            Ok::<_, cheapware_core::CoreError>(())
        })
        .await?;

    info!(%id, "Cart cleared");
    Ok(Json(CartResponse::new(id, cart)))
}

/// Builds the WhatsApp order link. The cart is left as is; the shopper
/// may still back out of the chat.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<CheckoutLink>> {
    let cart = state.cart(id).await?;
    let link = checkout::checkout(&cart, &state.checkout)?;

    info!(
        %id,
        items = cart.item_count(),
        subtotal = %cart.subtotal(),
        "Checkout link generated"
    );
    Ok(Json(link))
}
