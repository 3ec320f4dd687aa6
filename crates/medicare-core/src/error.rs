//! # Error Types
//!
//! Domain-specific error types for medicare-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medicare-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── CatalogError     - Catalog failed to load or validate             │
//! │  ├── SelectionError   - Advisory failures of cart/favorites/compare    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  medicare-auth errors (separate crate)                                 │
//! │  └── AuthError        - Sign-up / OTP failures                         │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the dashboard sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Advisory Failures
//! A [`SelectionError`] never aborts anything. The engine reports it through
//! the notifier, leaves state untouched and hands it back so callers can
//! branch on it if they care.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart / favorites / compare operation declined.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Failures while loading the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog JSON did not parse.
    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two records share the same id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(String),

    /// A record failed field validation.
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Selection Error
// =============================================================================

/// Advisory failures raised by the selection engine.
///
/// ## User Workflow
/// ```text
/// Click "Compare" on a 5th product
///      │
///      ▼
/// add_to_compare(id)
///      │
///      ▼
/// CapacityExceeded { max: 4 }
///      │
///      ├──► Notifier: "You can compare up to 4 products"
///      │
///      ▼
/// Compare list unchanged
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A gated operation was attempted without a signed-in user.
    #[error("Please sign in to {action}")]
    AuthRequired { action: String },

    /// The compare list is full.
    #[error("You can compare up to {max} products")]
    CapacityExceeded { max: usize },

    /// The product is already in the compare list.
    #[error("Product {product_id} is already in comparison")]
    DuplicateEntry { product_id: String },

    /// Caller supplied an invalid argument (e.g. zero quantity).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for selection engine results.
pub type SelectionResult<T> = Result<T, SelectionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_messages() {
        let err = SelectionError::CapacityExceeded { max: 4 };
        assert_eq!(err.to_string(), "You can compare up to 4 products");

        let err = SelectionError::AuthRequired {
            action: "add favorites".to_string(),
        };
        assert_eq!(err.to_string(), "Please sign in to add favorites");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "full name".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "full name must be at least 2 characters");
    }

    #[test]
    fn test_validation_converts_to_selection_and_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let selection_err: SelectionError = validation_err.clone().into();
        assert!(matches!(selection_err, SelectionError::Validation(_)));

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
