//! # medicare-core: Pure Business Logic for the MediCare Storefront
//!
//! This crate holds the product catalog, the query engine that drives the
//! product grid, and the selection engine that owns favorites, cart and the
//! compare list. Everything here is synchronous and free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     MediCare Storefront Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Dashboard (external)                     │   │
//! │  │   Product Grid ──► Compare Table ──► Favorites ──► Cart        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (session + commands)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ medicare-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │ catalog  │  │  query   │  │ selection │  │ validation│    │   │
//! │  │   │ Product  │  │ derive() │  │ Cart      │  │   rules   │    │   │
//! │  │   │ lookup   │  │ sort     │  │ Compare   │  │  checks   │    │   │
//! │  │   └──────────┘  └──────────┘  └───────────┘  └───────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │                 AuthSignal     │      Notifier                          │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              medicare-auth (signed-in user, OTP)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, SortOption, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`catalog`] - Read-only product catalog
//! - [`query`] - Search, category filter and sort
//! - [`auth`] - The signed-in signal the engine reads
//! - [`notify`] - Advisory notices sent back to the user
//! - [`selection`] - Favorites, cart and compare list
//!
//! ## Example Usage
//!
//! ```rust
//! use medicare_core::catalog::Catalog;
//! use medicare_core::query::ProductQuery;
//! use medicare_core::types::SortOption;
//!
//! let catalog = Catalog::load_default().unwrap();
//! let query = ProductQuery {
//!     search: "vitamin".to_string(),
//!     sort: SortOption::PriceAsc,
//!     ..ProductQuery::default()
//! };
//!
//! let results = query.apply(&catalog);
//! assert!(results.windows(2).all(|w| w[0].price() <= w[1].price()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod catalog;
pub mod error;
pub mod money;
pub mod notify;
pub mod query;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AuthSignal, AuthState};
pub use catalog::Catalog;
pub use error::{CatalogError, CoreError, SelectionError, ValidationError};
pub use money::Money;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use selection::{CartItem, CartTotals, SelectionEngine, SelectionSnapshot, SelectionState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of products in the compare list.
///
/// ## Business Reason
/// The comparison table renders one column per product; more than four
/// columns stop fitting on a laptop screen.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000 instead of 10) and keeps
/// every price × quantity sum well inside `i64`.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Maximum length of a product search query.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Number of digits in a one-time password.
pub const OTP_LENGTH: usize = 6;

/// Lifetime of a one-time password, in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;

/// Country code prepended to sign-up phone numbers.
pub const DEFAULT_PHONE_PREFIX: &str = "+91";
