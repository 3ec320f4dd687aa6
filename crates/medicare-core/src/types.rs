//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │   SortOption    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  Name           │       │
//! │  │  name, brand    │   │  email          │   │  PriceAsc       │       │
//! │  │  category       │   │  full_name      │   │  PriceDesc      │       │
//! │  │  price_cents    │   │  phone          │   │  Rating         │       │
//! │  │  rating         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                        ┌─────────────────┐                              │
//! │                        │ CategoryFilter  │                              │
//! │                        │  All            │                              │
//! │                        │  Only(name)     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::ALL_CATEGORIES;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Records are loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the product card.
    pub name: String,

    pub brand: String,

    /// Exact-match category used by the grid filter.
    pub category: String,

    /// Price in minor units.
    pub price_cents: i64,

    /// Pack size description, e.g. "60 tablets".
    #[serde(rename = "quantity")]
    pub pack_size: String,

    /// Average rating, 0 to 5.
    pub rating: f32,

    pub reviews_count: u32,

    pub ingredients: String,

    pub in_stock: bool,

    pub image_url: String,

    pub description: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Case-insensitive substring match on name, brand or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

// =============================================================================
// User
// =============================================================================

/// A signed-in storefront customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    /// Phone number including the country code.
    pub phone: String,
}

// =============================================================================
// Sort Option
// =============================================================================

/// Ordering applied to the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Name,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Rating,
    ];

    /// Wire name, as used by the dashboard's sort dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Name => "Name A-Z",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: SortOption::ALL.iter().map(|o| o.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Category restriction applied to the product grid.
///
/// On the wire this is a plain string; `"All"` means no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Returns true if the product passes this filter.
    pub fn accepts(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
