//! # Cart
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Dashboard Action         Engine call              Cart change          │
//! │  ────────────────         ───────────              ───────────          │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ────────► push or qty += n     │
//! │                                                                         │
//! │  +/- buttons ────────────► update_cart_quantity() ► qty = n (n<=0: drop)│
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ───► items.retain(..)    │
//! │                                                                         │
//! │  "Clear Cart" ───────────► clear_cart() ─────────► items.clear()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_quantity, ValidationResult};
use crate::MAX_ITEM_QUANTITY;

/// An item in the shopping cart.
///
/// ## Design Notes
/// `product` is a snapshot taken from the catalog when the item was first
/// added, so the cart keeps showing the price the customer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,

    /// Always positive.
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product: &Product, quantity: i64) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product again raises the
///   quantity)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY` (an update to 0 or below
///   removes the item)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// A merge that would push the line past `MAX_ITEM_QUANTITY` is refused
    /// and leaves the line as it was.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> ValidationResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        self.items.push(CartItem::new(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line. Zero or below removes it; anything above
    /// `MAX_ITEM_QUANTITY` is clamped to it.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity.min(MAX_ITEM_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Removes a line. Returns `false` when there was nothing to remove.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != initial_len
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across lines (the sidebar badge).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for responses and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::test_product;

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 5);
    }

    #[test]
    fn test_cart_rejects_non_positive_add() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert!(cart.add_item(&product, 0).is_err());
        assert!(cart.add_item(&product, -2).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_rejects_add_over_max_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert!(cart.add_item(&product, MAX_ITEM_QUANTITY + 1).is_err());
        assert!(cart.add_item(&product, i64::MAX).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_merge_cannot_exceed_max_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);
        cart.add_item(&product, MAX_ITEM_QUANTITY).unwrap();

        let err = cart.add_item(&product, 1).unwrap_err();

        assert!(matches!(err, ValidationError::OutOfRange { max: 999, .. }));
        assert_eq!(cart.get("1").unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total().cents(), 999 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_update_quantity_clamps_to_max() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 2499), 1).unwrap();

        assert!(cart.update_quantity("1", i64::MAX));

        assert_eq!(cart.get("1").unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total().cents(), 2499 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = Cart::new();
        let product = test_product("1", 500);
        cart.add_item(&product, 4).unwrap();

        assert!(cart.update_quantity("1", 2));
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 500), 1).unwrap();
        cart.add_item(&test_product("2", 500), 1).unwrap();

        assert!(cart.update_quantity("1", 0));
        assert!(cart.update_quantity("2", -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 500), 1).unwrap();
        let before = cart.clone();

        assert!(!cart.update_quantity("ghost", 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = Cart::new();
        assert_eq!(CartTotals::from(&cart), CartTotals::default());

        cart.add_item(&test_product("1", 1299), 2).unwrap();
        cart.add_item(&test_product("2", 350), 3).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total_cents, 2 * 1299 + 3 * 350);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }
}
