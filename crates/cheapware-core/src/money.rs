//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    899.99 * 3 = 2699.9700000000003                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    89999 cents * 3 = 269997 cents = $2699.97                            │
//! │                                                                         │
//! │  Dollars only exist at the edges: query strings and display.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cheapware_core::money::Money;
//!
//! let price = Money::from_cents(89999);              // $899.99
//! let doubled = price * 2;                           // $1799.98
//! let bound = Money::parse_decimal("500").unwrap();  // from ?maxPrice=500
//! assert!(price > bound);
//! assert_eq!(doubled.cents(), 179998);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (discounts) can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer** of cents
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartLine.unit_price ──► line total
///                                                   │
///                    Cart.subtotal ◄────────────────┘
///                         │
///                         ├──► shipping rule ($50 threshold)
///                         └──► WhatsApp order message
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a non-negative decimal dollar amount such as `"899.99"`.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "40"      → 4000 cents
    /// "0.5"     → 50 cents
    /// "129.99"  → 12999 cents
    /// " 12.30 " → 1230 cents (surrounding whitespace ignored)
    /// ```
    ///
    /// Signs, exponents, more than two fractional digits, and empty parts
    /// are rejected. This is the only way dollars enter the system, so the
    /// query string never goes through `f64`.
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (major, minor) = match input.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (input, None),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }

        let minor_cents = match minor {
            None => 0,
            Some(minor) => {
                if minor.is_empty() || minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid("expected one or two digits after the decimal point"));
                }
                let value: i64 = minor.parse().map_err(|_| invalid("bad cents"))?;
                if minor.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let major_value: i64 = major.parse().map_err(|_| invalid("amount is too large"))?;
        major_value
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor_cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Electric Kettle $39.99, quantity 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// "Electric Kettle x3 - $119.97"
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds without overflowing; used for cart totals.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Whole-percent discount from `original` down to `self`.
    ///
    /// Rounded to the nearest percent: $1099.99 → $899.99 is 18.18%, so 18.
    /// Returns `None` when there is no discount to show.
    ///
    /// ```rust
    /// use cheapware_core::money::Money;
    ///
    /// let now = Money::from_cents(89999);
    /// assert_eq!(now.percent_off(Money::from_cents(109999)), Some(18));
    /// assert_eq!(now.percent_off(now), None);
    /// ```
    pub fn percent_off(&self, original: Money) -> Option<u32> {
        if original.0 <= 0 || original.0 <= self.0 {
            return None;
        }
        let diff = (original.0 - self.0) as i128;
        let orig = original.0 as i128;
        // (diff * 100 / orig) rounded half up
        let pct = (diff * 200 + orig) / (orig * 2);
        u32::try_from(pct).ok()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders money the way the storefront shows it: `$899.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
