//! # Data Transfer Objects
//!
//! Request and response bodies. Domain types from `cheapware-core` are
//! reused where their shape already fits the wire; the types here add
//! derived fields or wrap several values into one body.

use cheapware_core::catalog::{Facets, ProductQuery, SortOrder};
use cheapware_core::{Cart, CartLine, CartSummary, Money, Product, Review, ReviewSummary, VoteKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ApiError;

// =============================================================================
// Products
// =============================================================================

/// A product plus the fields the product card computes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,

    /// Badge such as "18% OFF".
    pub discount: Option<String>,

    pub in_stock: bool,

    /// "$899.99"
    pub price_display: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            discount: product.discount_label(),
            in_stock: product.in_stock(),
            price_display: product.price().to_string(),
            product,
        }
    }
}

/// Query string of `GET /api/products`.
///
/// Everything arrives as text and is parsed here so a bad value gets the
/// storefront's own error body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub id: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub featured: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ProductListParams {
    /// Parses `?id=`, if present.
    pub fn product_id(&self) -> Result<Option<u64>, ApiError> {
        non_blank(&self.id)
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|_| ApiError::validation(format!("Invalid product id: {id}")))
            })
            .transpose()
    }

    pub fn to_query(&self) -> Result<ProductQuery, ApiError> {
        let mut query = ProductQuery::new();

        if let Some(category) = non_blank(&self.category) {
            query = query.category(category);
        }
        if let Some(brand) = non_blank(&self.brand) {
            query = query.brand(brand);
        }

        let min = non_blank(&self.min_price).map(Money::parse_decimal).transpose()?;
        let max = non_blank(&self.max_price).map(Money::parse_decimal).transpose()?;
        query = query.price_range(min, max);

        // only the literal "true" turns the filter on
        if non_blank(&self.featured) == Some("true") {
            query = query.featured_only();
        }

        if let Some(search) = non_blank(&self.search) {
            let term = cheapware_core::validation::validate_search_query(search)?;
            query = query.search(&term);
        }

        if let Some(sort) = non_blank(&self.sort) {
            query = query.sort(sort.parse::<SortOrder>()?);
        }

        if let Some(limit) = non_blank(&self.limit) {
            let limit = limit
                .parse::<usize>()
                .map_err(|_| ApiError::validation(format!("Invalid limit: {limit}")))?;
            query = query.limit(limit);
        }

        Ok(query)
    }
}

/// Query string of `GET /api/products/{id}/related`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FacetsResponse {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub sort_options: Vec<String>,
}

impl From<Facets> for FacetsResponse {
    fn from(facets: Facets) -> Self {
        FacetsResponse {
            categories: facets.categories,
            brands: facets.brands,
            sort_options: SortOrder::ALL.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct VoteRequest {
    pub kind: VoteKind,
}

// =============================================================================
// Carts
// =============================================================================

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    #[ts(as = "String")]
    pub id: Uuid,
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
    #[ts(as = "String")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CartResponse {
    pub fn new(id: Uuid, cart: Cart) -> Self {
        CartResponse {
            id,
            summary: CartSummary::from(&cart),
            updated_at: cart.updated_at,
            items: cart.items,
        }
    }
}

/// Body of `POST /api/carts/{cart_id}/items`.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddItemRequest {
    #[ts(type = "number")]
    pub product_id: u64,
    /// Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Body of `PUT /api/carts/{cart_id}/items/{product_id}`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ProductListParams {
        let object = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object)).unwrap()
    }

    #[test]
    fn test_to_query_parses_everything() {
        let query = params(&[
            ("category", "Kitchen"),
            ("minPrice", "100"),
            ("maxPrice", "599.99"),
            ("featured", "true"),
            ("search", " Smart "),
            ("sort", "price-high"),
            ("limit", "3"),
        ])
        .to_query()
        .unwrap();

        assert_eq!(query.category.as_deref(), Some("Kitchen"));
        assert_eq!(query.min_price, Some(Money::from_cents(10000)));
        assert_eq!(query.max_price, Some(Money::from_cents(59999)));
        assert!(query.featured);
        assert_eq!(query.search.as_deref(), Some("smart"));
        assert_eq!(query.sort, SortOrder::PriceHigh);
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn test_featured_only_on_literal_true() {
        assert!(!params(&[("featured", "false")]).to_query().unwrap().featured);
        assert!(!params(&[("featured", "1")]).to_query().unwrap().featured);
    }

    #[test]
    fn test_bad_values_are_validation_errors() {
        assert!(params(&[("minPrice", "cheap")]).to_query().is_err());
        assert!(params(&[("sort", "random")]).to_query().is_err());
        assert!(params(&[("limit", "-1")]).to_query().is_err());
        assert!(params(&[("id", "abc")]).product_id().is_err());
        assert_eq!(params(&[("id", "3")]).product_id().unwrap(), Some(3));
        assert_eq!(params(&[]).product_id().unwrap(), None);
    }

    #[test]
    fn test_product_dto_fields() {
        let product = cheapware_store::seed::default_catalog().remove(0);
        let dto = ProductDto::from(product);
        assert_eq!(dto.discount.as_deref(), Some("18% OFF"));
        assert!(dto.in_stock);
        assert_eq!(dto.price_display, "$899.99");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["priceCents"], 89999);
        assert_eq!(json["inStock"], true);
    }

    #[test]
    fn test_add_item_default_quantity() {
        let req: AddItemRequest = serde_json::from_str(r#"{"productId": 4}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }
}
