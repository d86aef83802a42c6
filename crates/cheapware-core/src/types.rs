//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  admin "Add"    │   │  admin "Edit"   │       │
//! │  │  name, brand    │   │  form payload   │   │  every field    │       │
//! │  │  price_cents    │   │                 │   │  optional       │       │
//! │  │  stock, rating  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │     Review      │   │    VoteKind     │       │
//! │  │  snapshot of    │   │  rating 1-5     │   │  Helpful        │       │
//! │  │  name + price   │   │  helpful votes  │   │  Unhelpful      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products and reviews use small incrementing integers. The admin panel and
//! product URLs (`/products/3`) show them directly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

/// Placeholder image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/placeholder.svg?height=300&width=300&text=New+Product";

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog id, generated on insert and never changed.
    #[ts(type = "number")]
    pub id: u64,

    /// Display name on cards, detail page and in the order message.
    pub name: String,

    pub description: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Price before discount, shown struck through on the detail page.
    pub original_price_cents: Option<i64>,

    /// Card image.
    pub image: String,

    /// Gallery images for the detail page.
    #[serde(default)]
    pub images: Vec<String>,

    pub category: String,

    pub brand: String,

    /// Units on hand. Informational only.
    pub stock: i64,

    /// Shown in the home page carousel and first under the default sort.
    pub featured: bool,

    /// Average rating, 0.0 to 5.0.
    pub rating: f32,

    /// Bullet list on the detail page.
    #[serde(default)]
    pub features: Vec<String>,

    /// Specification table on the detail page.
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the pre-discount price, if any.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }

    /// Badge text such as `"18% OFF"`.
    pub fn discount_label(&self) -> Option<String> {
        let original = self.original_price()?;
        self.price()
            .percent_off(original)
            .filter(|pct| *pct > 0)
            .map(|pct| format!("{pct}% OFF"))
    }

    /// Whether any units are on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `term` must already be lowercased.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
    }

    /// Applies an admin edit. The id never changes.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) -> Result<(), ValidationError> {
        patch.validate()?;

        let ProductPatch {
            name,
            description,
            price_cents,
            original_price_cents,
            image,
            images,
            category,
            brand,
            stock,
            featured,
            rating,
            features,
            specifications,
        } = patch;

        if let Some(name) = name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price_cents) = price_cents {
            self.price_cents = price_cents;
        }
        if let Some(original) = original_price_cents {
            self.original_price_cents = original;
        }
        if let Some(image) = image {
            self.image = image;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(featured) = featured {
            self.featured = featured;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(features) = features {
            self.features = features;
        }
        if let Some(specifications) = specifications {
            self.specifications = specifications;
        }

        self.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Payload for creating a product from the admin panel.
///
/// `name` and `price_cents` are required; everything else has a default.
/// Both are modelled as optional here so a missing field produces the
/// storefront's own message instead of a deserializer error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: String,
    pub price_cents: Option<i64>,
    pub original_price_cents: Option<i64>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub category: String,
    pub brand: String,
    pub stock: i64,
    pub featured: bool,
    pub rating: f32,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
}

impl NewProduct {
    /// Checks the payload before an id is allocated.
    ///
    /// A zero price counts as missing, the same as an empty name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_missing = self.name.as_deref().map_or(true, |n| n.trim().is_empty());
        let price_missing = self.price_cents.map_or(true, |p| p == 0);
        if name_missing || price_missing {
            return Err(ValidationError::RequiredFields("Name and price".to_string()));
        }

        if let Some(name) = &self.name {
            validation::validate_product_name(name)?;
        }
        if let Some(price) = self.price_cents {
            validation::validate_price_cents(price)?;
        }
        if let Some(original) = self.original_price_cents {
            validation::validate_price_cents(original)?;
        }
        validation::validate_stock(self.stock)?;
        validation::validate_rating(self.rating)?;
        Ok(())
    }

    /// Builds the catalog entry with the given id.
    pub fn into_product(self, id: u64, now: DateTime<Utc>) -> Result<Product, ValidationError> {
        self.validate()?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .ok_or_else(|| ValidationError::required("name"))?;
        let price_cents = self
            .price_cents
            .ok_or_else(|| ValidationError::required("price"))?;

        Ok(Product {
            id,
            name,
            description: self.description,
            price_cents,
            original_price_cents: self.original_price_cents,
            image: self.image.unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            images: self.images,
            category: self.category,
            brand: self.brand,
            stock: self.stock,
            featured: self.featured,
            rating: self.rating,
            features: self.features,
            specifications: self.specifications,
            created_at: now,
            updated_at: now,
        })
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial update from the admin "Edit" row. Absent fields are left alone.
///
/// `original_price_cents` is doubly optional: `null` clears the discount,
/// absence leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    #[serde(with = "double_option")]
    #[ts(optional, type = "number | null")]
    pub original_price_cents: Option<Option<i64>>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub stock: Option<i64>,
    pub featured: Option<bool>,
    pub rating: Option<f32>,
    pub features: Option<Vec<String>>,
    pub specifications: Option<BTreeMap<String, String>>,
}

impl ProductPatch {
    /// Validates only the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validation::validate_product_name(name)?;
        }
        if let Some(price) = self.price_cents {
            validation::validate_price_cents(price)?;
        }
        if let Some(Some(original)) = self.original_price_cents {
            validation::validate_price_cents(original)?;
        }
        if let Some(stock) = self.stock {
            validation::validate_stock(stock)?;
        }
        if let Some(rating) = self.rating {
            validation::validate_rating(rating)?;
        }
        Ok(())
    }
}

/// `Option<Option<T>>` that tells `null` apart from a missing key.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Snapshot Pattern
/// Name, price and image are copied from the product when it is first
/// added. Editing the product afterwards does not change carts that
/// already hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    #[ts(type = "number")]
    pub product_id: u64,
    pub name: String,
    pub unit_price_cents: i64,
    pub image: String,
    pub quantity: i64,
}

impl CartLine {
    /// Snapshots a product with the given quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            image: product.image.clone(),
            quantity,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// A customer review on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    #[ts(type = "number")]
    pub id: u64,
    #[ts(type = "number")]
    pub product_id: u64,
    pub author: String,
    /// Whole stars, 1 to 5.
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub helpful: u32,
    pub unhelpful: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Payload of the "Write a review" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct NewReview {
    pub author: Option<String>,
    pub rating: u8,
    pub title: String,
    pub content: String,
}

/// Which counter a review vote increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VoteKind {
    Helpful,
    Unhelpful,
}

// =============================================================================
// Unit Tests
// =============================================================================
