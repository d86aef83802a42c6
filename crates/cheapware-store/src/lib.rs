//! # cheapware-store: State Layer for the Cheapware Storefront
//!
//! Holds the catalog, reviews and carts. Everything except carts lives in
//! memory and is rebuilt from seed data on every start.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cheapware Data Flow                                 │
//! │                                                                         │
//! │  HTTP handler (GET /api/products)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cheapware-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │     Store     │    │  Repositories │    │  CartStore   │   │   │
//! │  │   │   (lib.rs)    │───►│ ProductRepo   │    │  memory      │   │   │
//! │  │   │               │    │ ReviewRepo    │    │  file        │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cheapware-core (filtering, cart math, validation)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cheapware_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::default()).await?;
//! let featured = store.products().featured().await;
//! ```

pub mod cart_store;
pub mod error;
pub mod repository;
pub mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

pub use cart_store::{CartStore, FileCartStore, MemoryCartStore};
pub use error::{StoreError, StoreResult};
pub use repository::product::ProductRepository;
pub use repository::review::ReviewRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Which [`CartStore`] to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartBackend {
    Memory,
    /// One JSON file per cart in this directory.
    File(PathBuf),
}

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new()
///     .catalog_path("./catalog.json")
///     .cart_backend(CartBackend::File("./carts".into()));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub cart_backend: CartBackend,
}

impl StoreConfig {
    pub fn new() -> Self {
        StoreConfig {
            catalog_path: None,
            cart_backend: CartBackend::Memory,
        }
    }

    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn cart_backend(mut self, backend: CartBackend) -> Self {
        self.cart_backend = backend;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to every repository. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    products: ProductRepository,
    reviews: ReviewRepository,
    carts: Arc<dyn CartStore>,
}

impl Store {
    /// Builds the store.
    ///
    /// ## What This Does
    /// 1. Loads the catalog file if one is configured, else the built-in catalog
    /// 2. Seeds sample reviews (built-in catalog only)
    /// 3. Picks the cart backend
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let (products, reviews) = match &config.catalog_path {
            Some(path) => (seed::load_catalog(path).await?, Vec::new()),
            None => (seed::default_catalog(), seed::default_reviews()),
        };

        let carts: Arc<dyn CartStore> = match &config.cart_backend {
            CartBackend::Memory => Arc::new(MemoryCartStore::new()),
            CartBackend::File(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                Arc::new(FileCartStore::new(dir.clone()))
            }
        };

        info!(
            products = products.len(),
            reviews = reviews.len(),
            cart_backend = ?config.cart_backend,
            "Store initialized"
        );

        Ok(Self::from_parts(
            ProductRepository::new(products),
            ReviewRepository::new(reviews),
            carts,
        ))
    }

    /// Default catalog with in-memory carts. Used by tests.
    pub fn in_memory() -> Self {
        Self::from_parts(
            ProductRepository::new(seed::default_catalog()),
            ReviewRepository::new(seed::default_reviews()),
            Arc::new(MemoryCartStore::new()),
        )
    }

    pub fn from_parts(products: ProductRepository, reviews: ReviewRepository, carts: Arc<dyn CartStore>) -> Self {
        Store {
            products,
            reviews,
            carts,
        }
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn reviews(&self) -> &ReviewRepository {
        &self.reviews
    }

    pub fn carts(&self) -> &dyn CartStore {
        self.carts.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_default() {
        let store = Store::open(StoreConfig::default()).await.unwrap();
        assert_eq!(store.products().count().await, 6);
        assert_eq!(store.reviews().list(1).await.len(), 3);
    }

    #[tokio::test]
    async fn test_open_with_catalog_file_and_file_carts() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let mut file = std::fs::File::create(&catalog_path).unwrap();
        file.write_all(br#"[{"name":"Toaster","priceCents":2999}]"#).unwrap();

        let cart_dir = dir.path().join("carts");
        let config = StoreConfig::new()
            .catalog_path(&catalog_path)
            .cart_backend(CartBackend::File(cart_dir.clone()));
        let store = Store::open(config).await.unwrap();

        assert_eq!(store.products().count().await, 1);
        assert!(store.reviews().list(1).await.is_empty());
        assert!(cart_dir.is_dir());
    }

    #[tokio::test]
    async fn test_open_fails_on_missing_catalog() {
        let config = StoreConfig::new().catalog_path("/no/such/catalog.json");
        assert!(Store::open(config).await.is_err());
    }
}
