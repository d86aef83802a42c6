//! # Cart Module
//!
//! The shopping cart and its totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Operation               Cart Change           │
//! │  ───────────────          ─────────               ───────────           │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_item() ──────────► push or qty += n      │
//! │                                                                         │
//! │  +/- stepper ────────────► update_quantity() ───► qty = n (≤0 removes)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ───────► items.remove(i)       │
//! │                                                                         │
//! │  "Clear cart" ───────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Order summary ──────────► CartSummary::from() ─► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shipping
//! Orders over [`FREE_SHIPPING_THRESHOLD`] ship free; everything else pays
//! [`FLAT_SHIPPING_FEE`]. An empty cart pays nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Product};
use crate::validation;
use crate::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product increases quantity)
/// - Every quantity is at least 1 (setting 0 removes the line)
/// - At most [`MAX_CART_ITEMS`] lines, each at most [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartLine>,

    /// Last time any line changed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by `quantity`
    /// - Product not in cart: a new line snapshots name, price and image
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;

        if let Some(line) = self.line_mut(product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            self.touch();
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }

        self.items.push(CartLine::from_product(product, quantity));
        self.touch();
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line (no-op if it is not there)
    /// - product not in cart: `NotInCart`
    pub fn update_quantity(&mut self, product_id: u64, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            let before = self.items.len();
            self.items.retain(|l| l.product_id != product_id);
            if self.items.len() != before {
                self.touch();
            }
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let line = self
            .line_mut(product_id)
            .ok_or(CoreError::NotInCart(product_id))?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, product_id: u64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|l| l.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::NotInCart(product_id))
        } else {
            self.touch();
            Ok(())
        }
    }

    /// Brings a cart that came from outside (a stored file) back within the
    /// cart invariants. Returns whether anything changed.
    ///
    /// ## Rules
    /// - Lines with quantity ≤ 0 or an out-of-range price are dropped
    /// - Duplicate lines for a product are merged into the first one
    /// - Quantities are capped at [`MAX_ITEM_QUANTITY`]
    /// - Lines past [`MAX_CART_ITEMS`] are dropped
    pub fn normalize(&mut self) -> bool {
        let before = self.items.clone();
        let mut lines: Vec<CartLine> = Vec::with_capacity(before.len());

        for line in self.items.drain(..) {
            if line.quantity <= 0 || validation::validate_price_cents(line.unit_price_cents).is_err() {
                continue;
            }
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => lines.push(line),
            }
        }

        for line in &mut lines {
            line.quantity = line.quantity.min(MAX_ITEM_QUANTITY);
        }
        lines.truncate(MAX_CART_ITEMS);

        self.items = lines;
        self.items != before
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.items.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: u64) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|l| l.product_id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities. This is the badge on the cart icon.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(CartLine::line_total)
            .fold(Money::zero(), |acc, line| acc.saturating_add(line))
    }

    /// Shipping for the current subtotal.
    pub fn shipping(&self) -> Money {
        shipping_for(self.subtotal(), self.is_empty())
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Money {
        self.subtotal().saturating_add(self.shipping())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Shipping rule: free strictly above the threshold, flat fee otherwise.
pub fn shipping_for(subtotal: Money, empty: bool) -> Money {
    if empty || subtotal > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Cart totals for API responses and the order summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
    pub free_shipping: bool,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let shipping = cart.shipping();
        CartSummary {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
            shipping_cents: shipping.cents(),
            total_cents: cart.total().cents(),
            free_shipping: !cart.is_empty() && shipping.is_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewProduct;
    use crate::MAX_PRICE_CENTS;

    fn test_product(id: u64, price_cents: i64) -> Product {
        NewProduct {
            name: Some(format!("Product {id}")),
            price_cents: Some(price_cents),
            ..Default::default()
        }
        .into_product(id, Utc::now())
        .unwrap()
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let kettle = test_product(4, 3999);

        cart.add_item(&kettle, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 7998);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 999);

        cart.add_item(&product, 1).unwrap();
        cart.add_item(&product, 1).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_rejects_bad_quantities() {
        let mut cart = Cart::new();
        let product = test_product(1, 999);

        assert!(cart.add_item(&product, 0).is_err());
        cart.add_item(&product, 999).unwrap();
        assert!(matches!(
            cart.add_item(&product, 1),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
    }

    #[test]
    fn test_cart_max_lines() {
        let mut cart = Cart::new();
        for id in 1..=MAX_CART_ITEMS as u64 {
            cart.add_item(&test_product(id, 100), 1).unwrap();
        }
        let overflow = test_product(1000, 100);
        assert!(matches!(cart.add_item(&overflow, 1), Err(CoreError::CartTooLarge { .. })));
    }

    #[test]
    fn test_largest_possible_cart_subtotal_is_exact() {
        let mut cart = Cart::new();
        for id in 1..=MAX_CART_ITEMS as u64 {
            cart.add_item(&test_product(id, MAX_PRICE_CENTS), MAX_ITEM_QUANTITY).unwrap();
        }

        let expected = MAX_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS as i64;
        assert_eq!(cart.subtotal().cents(), expected);
        assert_eq!(cart.total().cents(), expected);
        assert!(CartSummary::from(&cart).free_shipping);
    }

    #[test]
    fn test_oversized_line_saturates_instead_of_panicking() {
        let mut cart = Cart::new();
        cart.items.push(CartLine {
            product_id: 1,
            name: "Broken".to_string(),
            unit_price_cents: i64::MAX,
            image: String::new(),
            quantity: 2,
        });

        assert_eq!(cart.subtotal().cents(), i64::MAX);
        assert_eq!(CartSummary::from(&cart).total_cents, i64::MAX);
    }

    #[test]
    fn test_normalize_repairs_stored_cart() {
        let line = |product_id: u64, unit_price_cents: i64, quantity: i64| CartLine {
            product_id,
            name: format!("Product {product_id}"),
            unit_price_cents,
            image: String::new(),
            quantity,
        };

        let mut cart = Cart::new();
        cart.items = vec![
            line(1, 1000, 600),
            line(2, 500, 0),
            line(1, 1000, 600),
            line(3, i64::MAX, 1),
            line(4, 250, -3),
            line(5, 250, 2),
        ];

        assert!(cart.normalize());
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.line(1).unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.line(5).unwrap().quantity, 2);
        assert!(cart.line(3).is_none());

        // already valid: nothing to do
        assert!(!cart.normalize());
    }

    #[test]
    fn test_normalize_caps_line_count() {
        let mut cart = Cart::new();
        cart.items = (1..=MAX_CART_ITEMS as u64 + 5)
            .map(|id| CartLine::from_product(&test_product(id, 100), 1))
            .collect();

        assert!(cart.normalize());
        assert_eq!(cart.item_count(), MAX_CART_ITEMS);
    }

    #[test]
    fn test_snapshot_ignores_later_price_changes() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000);
        cart.add_item(&product, 1).unwrap();

        product.price_cents = 5000;
        cart.add_item(&product, 1).unwrap();

        assert_eq!(cart.line(1).unwrap().unit_price_cents, 1000);
        assert_eq!(cart.subtotal().cents(), 2000);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1000), 1).unwrap();

        cart.update_quantity(1, 5).unwrap();
        assert_eq!(cart.total_quantity(), 5);

        assert!(matches!(cart.update_quantity(2, 3), Err(CoreError::NotInCart(2))));
        assert!(cart.update_quantity(1, 1000).is_err());

        cart.update_quantity(1, 0).unwrap();
        assert!(cart.is_empty());

        // removing something that is not there is fine
        cart.update_quantity(1, -1).unwrap();
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1000), 1).unwrap();
        cart.add_item(&test_product(2, 2000), 1).unwrap();

        cart.remove_item(1).unwrap();
        assert!(matches!(cart.remove_item(1), Err(CoreError::NotInCart(1))));
        assert_eq!(cart.item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_shipping_threshold() {
        let mut cart = Cart::new();
        assert_eq!(cart.shipping(), Money::zero());

        // exactly $50.00 still pays shipping
        cart.add_item(&test_product(1, 5000), 1).unwrap();
        assert_eq!(cart.shipping(), FLAT_SHIPPING_FEE);
        assert_eq!(cart.total().cents(), 6000);

        cart.add_item(&test_product(2, 1), 1).unwrap();
        assert_eq!(cart.shipping(), Money::zero());
        assert_eq!(cart.total().cents(), 5001);
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(3, 12999), 2).unwrap();
        cart.add_item(&test_product(4, 3999), 1).unwrap();

        let summary = CartSummary::from(&cart);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.subtotal_cents, 29997);
        assert_eq!(summary.shipping_cents, 0);
        assert_eq!(summary.total_cents, 29997);
        assert!(summary.free_shipping);

        let empty = CartSummary::from(&Cart::new());
        assert!(!empty.free_shipping);
    }
}
