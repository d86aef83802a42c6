//! # cheapware-core: Pure Business Logic for the Cheapware Storefront
//!
//! This crate holds every rule of the storefront as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cheapware Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Product Grid ──► Product Detail ──► Cart ──► WhatsApp        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-api (axum)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cheapware-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐  │   │
//! │  │  │  money  │ │ catalog │ │  cart   │ │ checkout │ │ reviews │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              cheapware-store (repositories)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch, Review)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Product filtering, sorting, related products, facets
//! - [`cart`] - Cart lines, quantity arithmetic, shipping
//! - [`checkout`] - WhatsApp order message and deep link
//! - [`reviews`] - Review summaries and votes
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cheapware_core::money::Money;
//!
//! let kettle = Money::from_cents(3999);
//! assert_eq!(kettle.multiply_quantity(2).to_string(), "$79.98");
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod reviews;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary};
pub use catalog::{Facets, ProductQuery, SortOrder};
pub use checkout::{CheckoutLink, CheckoutSettings};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reviews::ReviewSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted product price ($1,000,000.00).
///
/// With [`MAX_CART_ITEMS`] and [`MAX_ITEM_QUANTITY`] this keeps every cart
/// subtotal well inside `i64` cents.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Subtotal above which shipping is free ($50.00).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(5_000);

/// Flat shipping fee charged below the threshold ($10.00).
pub const FLAT_SHIPPING_FEE: Money = Money::from_cents(1_000);

/// Number of related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Hard cap for the `limit` query parameter.
pub const MAX_LIST_LIMIT: usize = 100;
