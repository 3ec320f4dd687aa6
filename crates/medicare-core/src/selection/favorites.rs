//! # Favorites
//!
//! A set of product ids. Insertion order is kept so the favorites page lists
//! products in the order they were starred.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id. Returns `false` if it was already present.
    pub fn insert(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.ids.push(product_id.to_string());
        true
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

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut favorites = Favorites::new();

        assert!(favorites.insert("a"));
        assert!(!favorites.insert("a"));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut favorites = Favorites::new();
        favorites.insert("a");

        assert!(!favorites.remove("b"));
        assert!(favorites.remove("a"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut favorites = Favorites::new();
        favorites.insert("c");
        favorites.insert("a");
        favorites.insert("b");

        assert_eq!(favorites.ids(), ["c", "a", "b"]);
    }
}
