//! # Store Error Types
//!
//! Error types for repository and cart storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (rule violated)     io::Error / serde_json::Error            │
//! │       │                              │                                  │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │  StoreError (this module) ← Adds entity context                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront-api) ← JSON body + status code                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Display;

use cheapware_core::{CoreError, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity does not exist.
    ///
    /// ## When This Occurs
    /// - Unknown product id on get/update/delete
    /// - Unknown cart id
    /// - Unknown review id on vote
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading or writing cart files / the catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Display) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(StoreError::not_found("Product", 42).to_string(), "Product not found: 42");
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: StoreError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cannot check out an empty cart");

        let err: StoreError = ValidationError::required("name").into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
    }
}
