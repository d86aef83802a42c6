//! # Product Repository
//!
//! The in-memory catalog.
//!
//! ## Key Operations
//! - Filtered listing (delegates to `cheapware_core::catalog`)
//! - CRUD for the admin panel
//! - Related products and filter facets
//!
//! ## Id Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog: [1, 2, 3, 4, 5, 6]        high_water: 6                       │
//! │                                                                         │
//! │  insert  ──► id 7                   high_water: 7                       │
//! │  delete 7                           high_water: 7                       │
//! │  insert  ──► id 8  (7 is never handed out again)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use cheapware_core::catalog::{self, Facets, ProductQuery};
use cheapware_core::{NewProduct, Product, ProductPatch};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    high_water: u64,
}

/// Repository for catalog operations.
///
/// Cloning is cheap; clones share the same catalog.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(seed::default_catalog());
/// let kitchen = repo.list(&ProductQuery::new().category("Kitchen")).await;
/// assert_eq!(kitchen.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    inner: Arc<RwLock<Catalog>>,
}

impl ProductRepository {
    /// Creates a repository holding `products` in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        let high_water = products.iter().map(|p| p.id).max().unwrap_or(0);
        ProductRepository {
            inner: Arc::new(RwLock::new(Catalog {
                products,
                high_water,
            })),
        }
    }

    /// Runs a catalog query.
    pub async fn list(&self, query: &ProductQuery) -> Vec<Product> {
        debug!(?query, "Listing products");
        let state = self.inner.read().await;
        let results = catalog::filter_products(&state.products, query);
        debug!(count = results.len(), "Query returned products");
        results
    }

    pub async fn get(&self, id: u64) -> StoreResult<Product> {
        debug!(id, "Getting product by ID");
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Validates and appends a new product.
    pub async fn insert(&self, new_product: NewProduct) -> StoreResult<Product> {
        new_product.validate()?;

        let mut state = self.inner.write().await;
        let id = catalog::next_product_id(&state.products, state.high_water);
        let product = new_product.into_product(id, Utc::now())?;

        state.high_water = id;
        state.products.push(product.clone());

        info!(id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Applies a partial update. The id is preserved.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> StoreResult<Product> {
        let mut state = self.inner.write().await;
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.apply_patch(patch, Utc::now())?;

        info!(id, name = %product.name, "Product updated");
        Ok(product.clone())
    }

    /// Removes a product and returns it.
    pub async fn delete(&self, id: u64) -> StoreResult<Product> {
        let mut state = self.inner.write().await;
        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let removed = state.products.remove(index);
        info!(id, name = %removed.name, "Product deleted");
        Ok(removed)
    }

    /// Up to `limit` products from the same category.
    pub async fn related(&self, id: u64, limit: usize) -> StoreResult<Vec<Product>> {
        let state = self.inner.read().await;
        let product = state
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        Ok(catalog::related_products(&state.products, product, limit))
    }

    pub async fn featured(&self) -> Vec<Product> {
        catalog::featured_products(&self.inner.read().await.products)
    }

    pub async fn facets(&self) -> Facets {
        catalog::facets(&self.inner.read().await.products)
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use cheapware_core::{CoreError, SortOrder};

    fn repo() -> ProductRepository {
        ProductRepository::new(seed::default_catalog())
    }

    fn toaster() -> NewProduct {
        NewProduct {
            name: Some("Toaster".to_string()),
            price_cents: Some(2999),
            category: "Small Appliances".to_string(),
            brand: "QuickBoil".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_with_query() {
        let repo = repo();
        let cheap = repo
            .list(&ProductQuery::new().sort(SortOrder::PriceLow).limit(2))
            .await;
        assert_eq!(cheap.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 3]);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let err = repo().get(99).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id_and_defaults() {
        let repo = repo();
        let created = repo.insert(toaster()).await.unwrap();

        assert_eq!(created.id, 7);
        assert_eq!(created.stock, 0);
        assert!(!created.featured);
        assert_eq!(repo.count().await, 7);
        assert_eq!(repo.get(7).await.unwrap().name, "Toaster");
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_price() {
        let repo = repo();
        let err = repo
            .insert(NewProduct {
                name: Some("Toaster".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(repo.count().await, 6);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repo();
        let first = repo.insert(toaster()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.insert(toaster()).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_update_preserves_id() {
        let repo = repo();
        let updated = repo
            .update(
                4,
                ProductPatch {
                    name: Some("Electric Kettle Pro".to_string()),
                    price_cents: Some(4999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 4);
        assert_eq!(updated.price_cents, 4999);
        assert_eq!(updated.brand, "QuickBoil");
        assert_eq!(repo.get(4).await.unwrap().name, "Electric Kettle Pro");

        assert!(repo.update(42, ProductPatch::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo();
        let removed = repo.delete(6).await.unwrap();
        assert_eq!(removed.name, "Air Conditioner");
        assert!(repo.get(6).await.is_err());
        assert!(repo.delete(6).await.is_err());
    }

    #[tokio::test]
    async fn test_related_and_facets() {
        let repo = repo();
        let related = repo.related(3, 4).await.unwrap();
        assert_eq!(related.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);
        assert!(repo.related(99, 4).await.is_err());

        let facets = repo.facets().await;
        assert_eq!(facets.categories.len(), 5);
        assert_eq!(repo.featured().await.len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = repo();
        let other = repo.clone();
        other.delete(1).await.unwrap();
        assert_eq!(repo.count().await, 5);
    }
}
