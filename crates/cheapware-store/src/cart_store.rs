//! # Cart Storage
//!
//! Where shopping carts live between requests.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore implementations                          │
//! │                                                                         │
//! │  MemoryCartStore                    FileCartStore                       │
//! │  ───────────────                    ─────────────                       │
//! │  HashMap<Uuid, Cart>                {cart_dir}/{uuid}.json              │
//! │  lost on restart                    survives restarts                   │
//! │  tests, demos                       single-node deployments             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cart file that cannot be parsed is logged and read back as an empty
//! cart, so a shopper with a damaged file can keep shopping.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use cheapware_core::Cart;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreResult;

/// Persistence seam for carts.
#[async_trait]
pub trait CartStore: Send + Sync + Debug {
    /// Returns `None` for an unknown cart.
    async fn load(&self, id: Uuid) -> StoreResult<Option<Cart>>;

    /// Creates or replaces the cart.
    async fn save(&self, id: Uuid, cart: &Cart) -> StoreResult<()>;

    /// Returns whether a cart was removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

// =============================================================================
// Memory
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self, id: Uuid) -> StoreResult<Option<Cart>> {
        Ok(self.carts.read().await.get(&id).cloned())
    }

    async fn save(&self, id: Uuid, cart: &Cart) -> StoreResult<()> {
        self.carts.write().await.insert(id, cart.clone());
        debug!(%id, items = cart.item_count(), "Cart saved in memory");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.carts.write().await.remove(&id).is_some())
    }
}

// =============================================================================
// File
// =============================================================================

/// One JSON file per cart.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileCartStore { dir: dir.into() }
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self, id: Uuid) -> StoreResult<Option<Cart>> {
        let path = self.path_for(id);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Cart>(&raw) {
            Ok(mut cart) => {
                if cart.normalize() {
                    warn!(%id, path = %path.display(), "Cart file broke cart rules, repaired on load");
                }
                Ok(Some(cart))
            }
            Err(e) => {
                warn!(%id, path = %path.display(), error = %e, "Failed to parse cart file, starting empty");
                Ok(Some(Cart::new()))
            }
        }
    }

    async fn save(&self, id: Uuid, cart: &Cart) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(id);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(cart)?;

        // write then rename so readers never see a half-written file
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(%id, path = %path.display(), items = cart.item_count(), "Cart saved to file");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cheapware_core::NewProduct;

    fn cart_with_kettle() -> Cart {
        let kettle = NewProduct {
            name: Some("Electric Kettle".to_string()),
            price_cents: Some(3999),
            ..Default::default()
        }
        .into_product(4, Utc::now())
        .unwrap();

        let mut cart = Cart::new();
        cart.add_item(&kettle, 2).unwrap();
        cart
    }

    async fn exercise(store: &dyn CartStore) {
        let id = Uuid::new_v4();
        assert!(store.load(id).await.unwrap().is_none());

        let cart = cart_with_kettle();
        store.save(id, &cart).await.unwrap();
        assert_eq!(store.load(id).await.unwrap(), Some(cart));

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.load(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store() {
        exercise(&MemoryCartStore::new()).await;
    }

    #[tokio::test]
    async fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileCartStore::new(dir.path().join("carts"))).await;
    }

    #[tokio::test]
    async fn test_file_store_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();

        FileCartStore::new(dir.path())
            .save(id, &cart_with_kettle())
            .await
            .unwrap();

        let reopened = FileCartStore::new(dir.path());
        let cart = reopened.load(id).await.unwrap().unwrap();
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_cart_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        let id = Uuid::new_v4();

        std::fs::write(dir.path().join(format!("{id}.json")), b"{not json").unwrap();

        let cart = store.load(id).await.unwrap().unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_rule_cart_file_is_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        let id = Uuid::new_v4();

        let body = serde_json::json!({
            "items": [
                { "productId": 4, "name": "Electric Kettle", "unitPriceCents": 3999, "image": "", "quantity": 700 },
                { "productId": 4, "name": "Electric Kettle", "unitPriceCents": 3999, "image": "", "quantity": 700 },
                { "productId": 3, "name": "Smart Microwave Oven", "unitPriceCents": 12999, "image": "", "quantity": 0 },
                { "productId": 9, "name": "Gold Fridge", "unitPriceCents": i64::MAX, "image": "", "quantity": 2 }
            ],
            "updatedAt": "2024-01-01T09:00:00Z"
        });
        std::fs::write(dir.path().join(format!("{id}.json")), body.to_string()).unwrap();

        let cart = store.load(id).await.unwrap().unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line(4).unwrap().quantity, cheapware_core::MAX_ITEM_QUANTITY);
        assert_eq!(cart.subtotal().cents(), 3999 * cheapware_core::MAX_ITEM_QUANTITY);
    }
}
