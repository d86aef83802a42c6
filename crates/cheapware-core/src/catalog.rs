//! # Catalog Module
//!
//! Filtering, sorting and grouping of the product catalog.
//!
//! ## Query Pipeline
//! ```text
//! GET /api/products?category=kitchen&maxPrice=500&sort=price-low
//!      │
//!      ▼
//! ┌──────────┐  ┌───────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────┐
//! │ category │─►│ brand │─►│ minPrice │─►│ maxPrice │─►│ featured │─►│ search │
//! └──────────┘  └───────┘  └──────────┘  └──────────┘  └──────────┘  └───┬────┘
//!                                                                        │
//!                                      ┌───────┐      ┌──────┐           │
//!                         results ◄────│ limit │◄─────│ sort │◄──────────┘
//!                                      └───────┘      └──────┘
//! ```
//!
//! Every step is a linear scan over the slice. The catalog is small enough
//! that nothing here is indexed.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::MAX_LIST_LIMIT;

// =============================================================================
// Sort Order
// =============================================================================

/// Sort options offered by the product grid's dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOrder {
    /// Featured products first, catalog order otherwise.
    #[default]
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    /// Highest rating first.
    #[serde(rename = "rating")]
    Rating,
    /// Most recently created first.
    #[serde(rename = "newest")]
    Newest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Featured,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
        SortOrder::Rating,
        SortOrder::Newest,
    ];

    /// Wire name, as used in `?sort=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Rating => "rating",
            SortOrder::Newest => "newest",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            // true sorts before false
            SortOrder::Featured => b.featured.cmp(&a.featured),
            SortOrder::PriceLow => a.price_cents.cmp(&b.price_cents),
            SortOrder::PriceHigh => b.price_cents.cmp(&a.price_cents),
            SortOrder::Rating => b.rating.total_cmp(&a.rating),
            SortOrder::Newest => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: SortOrder::ALL.iter().map(|o| o.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Filter and sort options for a catalog listing. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Case-insensitive exact match.
    pub category: Option<String>,
    /// Case-insensitive exact match.
    pub brand: Option<String>,
    /// Inclusive lower bound.
    pub min_price: Option<Money>,
    /// Inclusive upper bound.
    pub max_price: Option<Money>,
    /// `true` keeps only featured products; `false` does not filter.
    pub featured: bool,
    /// Lowercased substring of name or description.
    pub search: Option<String>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Sets the search term. Blank terms clear it.
    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Caps the result count. Values above [`MAX_LIST_LIMIT`] are clamped.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.min(MAX_LIST_LIMIT));
        self
    }

    /// Whether a product passes every filter (sort and limit aside).
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !same_label(&product.category, category) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !same_label(&product.brand, brand) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price() > max {
                return false;
            }
        }
        if self.featured && !product.featured {
            return false;
        }
        match &self.search {
            Some(term) => product.matches_search(term),
            None => true,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Runs a query over the catalog.
///
/// Sorting is stable, so products that compare equal keep catalog order.
pub fn filter_products(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect();

    results.sort_by(|a, b| query.sort.compare(a, b));

    if let Some(limit) = query.limit {
        results.truncate(limit);
    }

    results
}

/// Products in the same category as `product`, excluding itself.
///
/// Used for "You may also like" on the detail page.
pub fn related_products(products: &[Product], product: &Product, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != product.id && p.category == product.category)
        .take(limit)
        .cloned()
        .collect()
}

/// Products flagged for the home page carousel.
pub fn featured_products(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.featured).cloned().collect()
}

/// Distinct categories and brands for the filter sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Facets {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

pub fn facets(products: &[Product]) -> Facets {
    let mut categories = BTreeSet::new();
    let mut brands = BTreeSet::new();

    for product in products {
        if !product.category.trim().is_empty() {
            categories.insert(product.category.clone());
        }
        if !product.brand.trim().is_empty() {
            brands.insert(product.brand.clone());
        }
    }

    Facets {
        categories: categories.into_iter().collect(),
        brands: brands.into_iter().collect(),
    }
}

/// Id for the next inserted product.
///
/// `high_water` is the largest id ever handed out, so ids of deleted
/// products are not reused.
pub fn next_product_id(products: &[Product], high_water: u64) -> u64 {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        .max(high_water)
        + 1
}

// =============================================================================
// Unit Tests
// =============================================================================

/// Case-insensitive label equality, Unicode-aware ("Électroménager").
fn same_label(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewProduct;
    use chrono::{Duration, TimeZone, Utc};

    fn product(id: u64, name: &str, cents: i64, category: &str, brand: &str, featured: bool, rating: f32) -> Product {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(id as i64);
        NewProduct {
            name: Some(name.to_string()),
            description: format!("{name} for your home"),
            price_cents: Some(cents),
            category: category.to_string(),
            brand: brand.to_string(),
            featured,
            rating,
            ..Default::default()
        }
        .into_product(id, created)
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Premium Refrigerator", 89999, "Refrigeration", "CoolTech", true, 4.5),
            product(2, "Front Load Washing Machine", 64999, "Laundry", "CleanPro", true, 4.2),
            product(3, "Smart Microwave Oven", 12999, "Kitchen", "SmartCook", false, 4.7),
            product(4, "Electric Kettle", 3999, "Small Appliances", "QuickBoil", false, 4.0),
            product(5, "Dishwasher", 54999, "Kitchen", "CleanDish", false, 4.6),
            product(6, "Air Conditioner", 49999, "Climate Control", "CoolAir", false, 4.3),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_no_filters_returns_catalog_order_with_featured_first() {
        let results = filter_products(&catalog(), &ProductQuery::new());
        assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let results = filter_products(&catalog(), &ProductQuery::new().category("kitchen"));
        assert_eq!(ids(&results), vec![3, 5]);
    }

    #[test]
    fn test_non_ascii_labels_match_case_insensitively() {
        let mut products = catalog();
        products[4].category = "Électroménager".to_string();
        products[4].brand = "Ørsted".to_string();

        let by_category = filter_products(&products, &ProductQuery::new().category("ÉLECTROMÉNAGER"));
        assert_eq!(ids(&by_category), vec![5]);

        let by_brand = filter_products(&products, &ProductQuery::new().brand("ørsted"));
        assert_eq!(ids(&by_brand), vec![5]);
    }

    #[test]
    fn test_brand_and_price_range() {
        let query = ProductQuery::new().price_range(Some(Money::from_cents(40000)), Some(Money::from_cents(64999)));
        assert_eq!(ids(&filter_products(&catalog(), &query)), vec![2, 5, 6]);

        let query = ProductQuery::new().brand("cooltech");
        assert_eq!(ids(&filter_products(&catalog(), &query)), vec![1]);
    }

    #[test]
    fn test_featured_only() {
        let results = filter_products(&catalog(), &ProductQuery::new().featured_only());
        assert_eq!(ids(&results), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let results = filter_products(&catalog(), &ProductQuery::new().search("SMART"));
        assert_eq!(ids(&results), vec![3]);

        let results = filter_products(&catalog(), &ProductQuery::new().search("for your home"));
        assert_eq!(results.len(), 6);

        let blank = ProductQuery::new().search("   ");
        assert_eq!(blank.search, None);
    }

    #[test]
    fn test_sort_orders() {
        let products = catalog();

        let by = |sort| ids(&filter_products(&products, &ProductQuery::new().sort(sort)));

        assert_eq!(by(SortOrder::PriceLow), vec![4, 3, 6, 5, 2, 1]);
        assert_eq!(by(SortOrder::PriceHigh), vec![1, 2, 5, 6, 3, 4]);
        assert_eq!(by(SortOrder::Rating), vec![3, 5, 1, 6, 2, 4]);
        assert_eq!(by(SortOrder::Newest), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_newest_breaks_ties_by_id() {
        let mut products = catalog();
        let stamp = products[0].created_at;
        for p in &mut products {
            p.created_at = stamp;
        }
        let results = filter_products(&products, &ProductQuery::new().sort(SortOrder::Newest));
        assert_eq!(ids(&results), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_limit_is_clamped() {
        let results = filter_products(&catalog(), &ProductQuery::new().sort(SortOrder::PriceLow).limit(2));
        assert_eq!(ids(&results), vec![4, 3]);
        assert_eq!(ProductQuery::new().limit(5000).limit, Some(MAX_LIST_LIMIT));
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("price-low".parse::<SortOrder>().unwrap(), SortOrder::PriceLow);
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Newest);
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::PriceHigh.to_string(), "price-high");
    }

    #[test]
    fn test_related_products() {
        let products = catalog();
        let microwave = &products[2];
        let related = related_products(&products, microwave, 4);
        assert_eq!(ids(&related), vec![5]);

        let kettle = &products[3];
        assert!(related_products(&products, kettle, 4).is_empty());
    }

    #[test]
    fn test_facets_are_sorted_and_distinct() {
        let facets = facets(&catalog());
        assert_eq!(
            facets.categories,
            vec!["Climate Control", "Kitchen", "Laundry", "Refrigeration", "Small Appliances"]
        );
        assert_eq!(facets.brands.len(), 6);
        assert_eq!(facets.brands[0], "CleanDish");
    }

    #[test]
    fn test_next_product_id() {
        assert_eq!(next_product_id(&[], 0), 1);
        assert_eq!(next_product_id(&catalog(), 0), 7);
        assert_eq!(next_product_id(&catalog(), 9), 10);
        assert_eq!(next_product_id(&catalog()[..2], 6), 7);
    }
}
