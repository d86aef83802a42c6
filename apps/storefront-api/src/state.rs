//! # Application State
//!
//! Shared by every handler through `State<Arc<AppState>>`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState                                                               │
//! │  ├── store           ProductRepository, ReviewRepository, CartStore     │
//! │  ├── checkout        WhatsApp number + base URL                         │
//! │  ├── cart_writes     serialises load → modify → save on carts           │
//! │  └── catalog_writes  serialises product delete against review create    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cheapware_core::{Cart, CheckoutSettings};
use cheapware_store::Store;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub checkout: CheckoutSettings,
    cart_writes: Mutex<()>,
    catalog_writes: Mutex<()>,
}

impl AppState {
    pub fn new(store: Store, checkout: CheckoutSettings) -> Self {
        AppState {
            store,
            checkout,
            cart_writes: Mutex::new(()),
            catalog_writes: Mutex::new(()),
        }
    }

    /// Held while a product is deleted or a review is attached to one, so a
    /// review can never outlive its product.
    pub async fn lock_catalog(&self) -> MutexGuard<'_, ()> {
        self.catalog_writes.lock().await
    }

    /// Loads a cart or fails with 404.
    pub async fn cart(&self, id: Uuid) -> ApiResult<Cart> {
        self.store
            .carts()
            .load(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Cart not found"))
    }

    /// Runs `f` on a cart and saves it if `f` succeeds.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let cart = state.with_cart_mut(id, |cart| cart.remove_item(4)).await?;
    /// ```
    pub async fn with_cart_mut<F, E>(&self, id: Uuid, f: F) -> ApiResult<Cart>
    where
        F: FnOnce(&mut Cart) -> Result<(), E>,
        ApiError: From<E>,
    {
        let _guard = self.cart_writes.lock().await;

        let mut cart = self.cart(id).await?;
        f(&mut cart)?;
        self.store.carts().save(id, &cart).await?;
        Ok(cart)
    }
}
