//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Dashboard                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  {"command":"add_to_compare", ...}                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Selection declined? ── SelectionError::CapacityExceeded ──┐     │  │
//! │  │         │                                                  │     │  │
//! │  │         ▼                                                  ▼     │  │
//! │  │  OTP rejected? ──────── AuthError::InvalidOtp ─────── ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { "ok": false,                                                         │
//! │    "error": { "code": "CAPACITY_EXCEEDED",                              │
//! │               "message": "You can compare up to 4 products" },          │
//! │    "notices": [ ... ] }                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medicare_auth::AuthError;
use medicare_core::{CatalogError, CoreError, SelectionError, ValidationError};
use serde::Serialize;
use ts_rs::TS;

use crate::state::ConfigError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: vit-c-1000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The operation needs a signed-in user
    AuthRequired,

    /// Compare list is full
    CapacityExceeded,

    /// Product already in the compare list
    Duplicate,

    /// OTP missing, wrong or expired
    InvalidOtp,

    /// SMS could not be sent
    DeliveryFailed,

    /// Request line could not be parsed as a command
    InvalidCommand,

    /// Bad configuration or catalog
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        let code = match &err {
            SelectionError::AuthRequired { .. } => ErrorCode::AuthRequired,
            SelectionError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            SelectionError::DuplicateEntry { .. } => ErrorCode::Duplicate,
            SelectionError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        tracing::error!(error = %err, "Catalog rejected");
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Catalog(e) => e.into(),
            CoreError::Selection(e) => e.into(),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            AuthError::InvalidOtp | AuthError::NoPendingSignUp { .. } => {
                ApiError::new(ErrorCode::InvalidOtp, err.to_string())
            }
            AuthError::NotSignedIn => ApiError::new(ErrorCode::AuthRequired, err.to_string()),
            AuthError::Delivery(reason) => {
                tracing::error!(%reason, "OTP delivery failed");
                ApiError::new(ErrorCode::DeliveryFailed, "Failed to send OTP")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, format!("Invalid command: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
