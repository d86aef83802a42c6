//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<T, ApiError>                                                    │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ───────────► 404 NOT_FOUND             │
//! │         ├── ValidationError ────────────────► 400 VALIDATION_ERROR      │
//! │         ├── CoreError::CartTooLarge etc. ───► 400 CART_ERROR            │
//! │         ├── CoreError::EmptyCart ───────────► 422 EMPTY_CART            │
//! │         ├── bad JSON / path ────────────────► 400 BAD_REQUEST           │
//! │         └── I/O, serialization ─────────────► 500 INTERNAL              │
//! │                                                                         │
//! │  Body: { "error": "Product not found: 9", "code": "NOT_FOUND" }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cheapware_core::{CoreError, ValidationError};
use cheapware_store::StoreError;
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "error": "Name and price are required fields",
///   "code": "VALIDATION_ERROR"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub message: String,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Request could not be parsed (400)
    BadRequest,

    /// Cart rule violated (400)
    CartError,

    /// Checkout with nothing in the cart (422)
    EmptyCart,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::BadRequest | ErrorCode::CartError => StatusCode::BAD_REQUEST,
            ErrorCode::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Bare "Product not found" style message, as the catalog endpoints use.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => ApiError::not_found(format!("{entity} not found")),
            StoreError::Core(e) => e.into(),
            StoreError::Io(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Storage I/O failed");
                ApiError::internal("Storage operation failed")
            }
            StoreError::Serialization(e) => {
                tracing::error!(error = %e, "Storage serialization failed");
                ApiError::internal("Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => ApiError::not_found("Product not found"),
            CoreError::ReviewNotFound(_) => ApiError::not_found("Review not found"),
            CoreError::NotInCart(_) | CoreError::CartTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::QuantityTooLarge { .. } => ApiError::validation(err.to_string()),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::not_found("Product", 9).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = CoreError::NotInCart(3).into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = StoreError::from(ValidationError::RequiredFields("Name and price".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Name and price are required fields");
    }

    #[test]
    fn test_io_errors_are_hidden() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let err: ApiError = StoreError::Io(io).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ApiError::not_found("Product not found")).unwrap();
        assert_eq!(body["error"], "Product not found");
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
