//! # Catalog Store
//!
//! The fixed, read-only set of purchasable products.
//!
//! ## Lifecycle
//! ```text
//! data/products.json ──(include_str!)──► Catalog::load_default()
//!                                              │
//!                                              ▼
//!                              validate every record, index by id
//!                                              │
//!                                              ▼
//!                              Arc<Catalog> shared by engine + grid
//! ```
//!
//! Lookups of unknown ids return `None`; they are never an error.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CatalogError;
use crate::types::Product;
use crate::validation::{validate_price_cents, validate_product_id, validate_product_name, validate_rating};
use crate::ALL_CATEGORIES;

/// Catalog compiled into the binary.
const DEFAULT_CATALOG_JSON: &str = include_str!("../data/products.json");

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    /// id -> position in `products`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, validating every record.
    ///
    /// ## Checks
    /// - id present and unique
    /// - name present
    /// - price non-negative
    /// - rating within 0..=5
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            let invalid = |source| CatalogError::InvalidProduct {
                id: product.id.clone(),
                source,
            };

            validate_product_id(&product.id).map_err(invalid)?;
            validate_product_name(&product.name).map_err(invalid)?;
            validate_price_cents(product.price_cents).map_err(invalid)?;
            validate_rating(product.rating).map_err(invalid)?;

            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        debug!(count = products.len(), "Catalog loaded");
        Ok(Catalog { products, index })
    }

    /// Parses a JSON array of product records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Loads the catalog shipped with the storefront.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    /// All products in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category dropdown entries: `"All"` then each distinct category in
    /// catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Resolves ids to products, keeping the given order and dropping ids the
    /// catalog does not know.
    pub fn resolve<'a, I>(&self, ids: I) -> Vec<&Product>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
