//! # Error Types
//!
//! Domain-specific error types for cheapware-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cheapware-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog / cart / checkout rule violations       │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  cheapware-store errors (separate crate)                                │
//! │  └── StoreError       - Repository and cart storage failures            │
//! │                                                                         │
//! │  storefront-api errors (in app)                                         │
//! │  └── ApiError         - What the frontend sees (JSON + status code)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Frontend   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Cart has no line for this product.
    #[error("Product {0} is not in the cart")]
    NotInCart(u64),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was requested for a cart with no lines.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart page (empty) ──► "Checkout via WhatsApp"
    ///      │
    ///      ▼
    /// EmptyCart ──► UI shows "Your cart is empty"
    /// ```
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Review id does not exist.
    #[error("Review not found: {0}")]
    ReviewNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several fields required together, e.g. "Name and price".
    #[error("{0} are required fields")]
    RequiredFields(String),

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed price string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::ProductNotFound(7).to_string(), "Product not found: 7");
        assert_eq!(
            CoreError::QuantityTooLarge {
                requested: 1200,
                max: 999
            }
            .to_string(),
            "Quantity 1200 exceeds maximum allowed (999)"
        );
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot check out an empty cart"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating must be between 1 and 5");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
