//! # Validation Module
//!
//! Input validation for the storefront.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web frontend                                                  │
//! │  └── Required fields in the admin form, quantity steppers               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront-api (axum)                                         │
//! │  ├── Type validation (serde deserialization)                            │
//! │  └── THIS MODULE: business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: cheapware-core types                                          │
//! │  └── Cart invariants (unique lines, quantity ≥ 1)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cheapware_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Electric Kettle").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search term.
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use cheapware_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Premium Refrigerator").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no search filter)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed, lowercased term ready for [`crate::Product::matches_search`].
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_lowercase())
}

/// Validates a WhatsApp phone number and returns it as bare digits.
///
/// Spaces, `+`, `-`, `.` and parentheses are stripped: `"+1 (234) 567-890"`
/// becomes `"1234567890"`. Anything else is rejected.
pub fn validate_phone_number(phone: &str) -> ValidationResult<String> {
    let mut digits = String::with_capacity(phone.len());

    for c in phone.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '+' | '-' | '.' | '(' | ')' => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "phone_number".to_string(),
                    reason: "must contain only digits and separators".to_string(),
                })
            }
        }
    }

    if digits.is_empty() {
        return Err(ValidationError::required("phone_number"));
    }

    // E.164 caps numbers at 15 digits
    if digits.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "phone_number".to_string(),
            max: 15,
        });
    }

    Ok(digits)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents: zero up to [`MAX_PRICE_CENTS`].
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a quantity being added to the cart.
///
/// ## Rules
/// - Must be at least 1
/// - At most [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates stock on hand.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBePositive {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a product's average rating (0.0 to 5.0).
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }
    Ok(())
}

/// Validates the star count on a customer review (1 to 5).
pub fn validate_review_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
