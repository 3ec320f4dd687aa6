//! # Product Commands
//!
//! Catalog browsing for the product grid.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Browse Flow                                  │
//! │                                                                         │
//! │  User types "vitamin", picks "Vitamins", sorts by price                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {"command":"browse_products","search":"vitamin",                       │
//! │   "category":"Vitamins","sort":"price-asc"}                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  1. Trim search, reject > 100 chars       │                         │
//! │  │  2. Keep name/brand/description matches   │                         │
//! │  │  3. Keep exact category matches           │                         │
//! │  │  4. Stable sort                           │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductListResponse { products, total, hasActiveFilters }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medicare_core::query::ProductQuery;
use medicare_core::validation::validate_search_query;
use medicare_core::{CoreError, Product};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;

/// Result of a grid query.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
    /// Drives the "Clear filters" button.
    pub has_active_filters: bool,
}

/// Filters and sorts the catalog.
pub fn browse_products(
    session: &SessionState,
    mut query: ProductQuery,
) -> Result<ProductListResponse, ApiError> {
    debug!(search = %query.search, category = %query.category, sort = %query.sort, "browse_products command");
    let start = Instant::now();

    query.search = validate_search_query(&query.search)?;

    let products: Vec<Product> = query
        .apply(session.catalog())
        .into_iter()
        .cloned()
        .collect();

    info!(
        results = products.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Products browsed"
    );

    Ok(ProductListResponse {
        total: products.len(),
        has_active_filters: query.has_active_filters(),
        products,
    })
}

/// Gets a single product.
pub fn get_product(session: &SessionState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id, "get_product command");

    session
        .catalog()
        .get(product_id)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
}

/// Category choices for the filter dropdown, "All" first.
pub fn get_categories(session: &SessionState) -> Vec<String> {
    debug!("get_categories command");
    session.catalog().categories()
}
