//! # Query / Filter / Sort Engine
//!
//! Derives the product grid from the catalog and the user's current filters.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.all()                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. search text (non-empty)?  keep name|brand|description ∋ text        │
//! │       │                       (case-insensitive)                        │
//! │       ▼                                                                 │
//! │  2. category != "All"?        keep category == selected                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. stable sort by SortOption (name / price-asc / price-desc / rating)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<&Product> rendered by the grid                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sort is stable, so products that tie keep their catalog order and
//! re-filtering never shuffles equal items.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{CategoryFilter, Product, SortOption};

/// Filters and sorts `products`.
///
/// The search text is matched as-is (no trimming); an empty string disables
/// the search filter.
pub fn derive<'a>(
    products: &'a [Product],
    search: &str,
    category: &CategoryFilter,
    sort: SortOption,
) -> Vec<&'a Product> {
    let needle = search.to_lowercase();

    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.matches_search(&needle))
        .filter(|p| category.accepts(p))
        .collect();

    filtered.sort_by(|a, b| compare(a, b, sort));
    filtered
}

/// Ordering used by [`derive`].
fn compare(a: &Product, b: &Product, sort: SortOption) -> Ordering {
    match sort {
        SortOption::Name => compare_names(&a.name, &b.name),
        SortOption::PriceAsc => a.price_cents.cmp(&b.price_cents),
        SortOption::PriceDesc => b.price_cents.cmp(&a.price_cents),
        SortOption::Rating => b.rating.total_cmp(&a.rating),
    }
}

/// Dictionary-style name ordering: case-insensitive first, then the raw
/// string to break ties between names differing only in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// Product Query
// =============================================================================

/// The grid's filter bar state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOption,
}

impl ProductQuery {
    /// Runs the query against the catalog.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        derive(catalog.all(), &self.search, &self.category, self.sort)
    }

    /// True when anything differs from the default view (drives the
    /// "Clear" button).
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || !self.category.is_all() || self.sort != SortOption::Name
    }

    /// Resets search, category and sort.
    pub fn clear(&mut self) {
        *self = ProductQuery::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_price_asc_keeps_every_product() {
        let catalog = Catalog::load_default().unwrap();

        let result = derive(catalog.all(), "", &CategoryFilter::All, SortOption::PriceAsc);

        assert_eq!(result.len(), catalog.len());
        assert!(result.windows(2).all(|w| w[0].price_cents <= w[1].price_cents));
    }

    #[test]
    fn test_vitamin_search_sorted_by_name() {
        let catalog = Catalog::load_default().unwrap();

        let result = derive(catalog.all(), "vitamin", &CategoryFilter::All, SortOption::Name);

        assert_eq!(
            ids(&result),
            vec!["multi-daily", "vit-c-1000", "vit-d3-2000", "zinc-50"]
        );
        assert!(result.iter().all(|p| p.matches_search("vitamin")));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::load_default().unwrap();

        let upper = derive(catalog.all(), "VITAMIN", &CategoryFilter::All, SortOption::Name);
        let lower = derive(catalog.all(), "vitamin", &CategoryFilter::All, SortOption::Name);
        assert_eq!(ids(&upper), ids(&lower));

        // Brand matches count too
        let brand = derive(catalog.all(), "pulsecheck", &CategoryFilter::All, SortOption::Name);
        assert_eq!(ids(&brand), vec!["bp-monitor", "thermometer"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let catalog = Catalog::load_default().unwrap();

        let first_aid = derive(
            catalog.all(),
            "",
            &CategoryFilter::from("First Aid"),
            SortOption::Name,
        );
        assert_eq!(ids(&first_aid), vec!["antiseptic-liquid", "bandage-kit"]);

        let lowercase = derive(
            catalog.all(),
            "",
            &CategoryFilter::from("first aid"),
            SortOption::Name,
        );
        assert!(lowercase.is_empty());
    }

    #[test]
    fn test_search_and_category_combine() {
        let catalog = Catalog::load_default().unwrap();

        let result = derive(
            catalog.all(),
            "vitamin",
            &CategoryFilter::from("Supplements"),
            SortOption::Name,
        );
        assert_eq!(ids(&result), vec!["zinc-50"]);
    }

    #[test]
    fn test_price_desc_and_rating() {
        let catalog = Catalog::load_default().unwrap();

        let desc = derive(catalog.all(), "", &CategoryFilter::All, SortOption::PriceDesc);
        assert_eq!(desc[0].id, "bp-monitor");
        assert!(desc.windows(2).all(|w| w[0].price_cents >= w[1].price_cents));

        let rated = derive(catalog.all(), "", &CategoryFilter::All, SortOption::Rating);
        assert_eq!(rated[0].id, "vit-d3-2000");
        assert!(rated.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::load_default().unwrap();

        // omega-3 and thermometer both cost 24.99; omega-3 comes first in
        // the catalog, in both directions.
        let asc = ids(&derive(catalog.all(), "", &CategoryFilter::All, SortOption::PriceAsc));
        let desc = ids(&derive(catalog.all(), "", &CategoryFilter::All, SortOption::PriceDesc));

        for order in [asc, desc] {
            let omega = order.iter().position(|id| id == "omega-3").unwrap();
            let thermo = order.iter().position(|id| id == "thermometer").unwrap();
            assert!(omega < thermo);
        }
    }

    #[test]
    fn test_name_sort_ignores_case() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zinc", "aloe"), Ordering::Greater);
        assert_eq!(compare_names("Aloe", "aloe"), Ordering::Less);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = Catalog::load_default().unwrap();
        let result = derive(catalog.all(), "unobtainium", &CategoryFilter::All, SortOption::Name);
        assert!(result.is_empty());
    }

    #[test]
    fn test_product_query_defaults_and_clear() {
        let catalog = Catalog::load_default().unwrap();

        let mut query = ProductQuery::default();
        assert!(!query.has_active_filters());
        assert_eq!(query.apply(&catalog).len(), catalog.len());

        query.category = CategoryFilter::from("Pain Relief");
        assert!(query.has_active_filters());
        assert_eq!(query.apply(&catalog).len(), 2);

        query.clear();
        assert_eq!(query, ProductQuery::default());
    }

    #[test]
    fn test_product_query_deserializes_partial_input() {
        let query: ProductQuery = serde_json::from_str(r#"{"sort":"rating"}"#).unwrap();
        assert_eq!(query.sort, SortOption::Rating);
        assert!(query.category.is_all());
        assert!(query.search.is_empty());
    }
}
