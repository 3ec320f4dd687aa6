//! # Compare List
//!
//! Ordered product ids shown side by side in the comparison table.
//!
//! ## Invariants
//! - At most [`MAX_COMPARE_ITEMS`] entries
//! - No duplicates
//!
//! Capacity is checked before membership, so re-adding a product to a full
//! list reports the capacity limit.

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};
use crate::MAX_COMPARE_ITEMS;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompareList {
    ids: Vec<String>,
}

impl CompareList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an id, or declines with `CapacityExceeded` / `DuplicateEntry`.
    pub fn add(&mut self, product_id: &str) -> SelectionResult<()> {
        if self.is_full() {
            return Err(SelectionError::CapacityExceeded {
                max: MAX_COMPARE_ITEMS,
            });
        }

        if self.contains(product_id) {
            return Err(SelectionError::DuplicateEntry {
                product_id: product_id.to_string(),
            });
        }

        self.ids.push(product_id.to_string());
        Ok(())
    }

    /// Removes an id. Returns `false` if it was not present.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.ids.len();
        self.ids.retain(|id| id != product_id);
        self.ids.len() != initial_len
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE_ITEMS
    }
}
