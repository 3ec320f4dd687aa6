//! # Selection State Engine
//!
//! Owns the customer's favorites, cart and compare list for one session.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SelectionEngine                                      │
//! │                                                                         │
//! │  Arc<Catalog> ────────► product lookups (read-only)                     │
//! │  Arc<dyn AuthSignal> ─► "is someone signed in?" (read-only)             │
//! │  Arc<dyn Notifier> ───► advisory notices                                │
//! │                                                                         │
//! │  SelectionState (owned, mutated only through the engine)                │
//! │  ├── favorites: Favorites      set of ids                               │
//! │  ├── cart:      Cart           unique lines, qty > 0                    │
//! │  └── compare:   CompareList    ≤ 4 ids, no duplicates                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Gating
//! `add_to_favorites` and `add_to_cart` match on [`AuthState`]; an anonymous
//! caller gets `AuthRequired` and nothing changes. Removals, compare-list
//! operations and reads are open to everyone.
//!
//! ## Failure Semantics
//! Every failure is advisory: the engine sends a notice, leaves state as it
//! was, and returns the [`SelectionError`].

mod cart;
mod compare;
mod favorites;

pub use cart::{Cart, CartItem, CartTotals};
pub use compare::CompareList;
pub use favorites::Favorites;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::auth::{AuthSignal, AuthState};
use crate::catalog::Catalog;
use crate::error::{SelectionError, SelectionResult};
use crate::money::Money;
use crate::notify::{Notice, Notifier};
use crate::types::{Product, User};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Selection State
// =============================================================================

/// Favorites, cart and compare list for one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub favorites: Favorites,
    pub cart: Cart,
    pub compare: CompareList,
}

/// Point-in-time copy of the selection state pushed to observers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub favorites: Vec<String>,
    pub cart: Vec<CartItem>,
    pub compare_list: Vec<String>,
    pub totals: CartTotals,
}

impl From<&SelectionState> for SelectionSnapshot {
    fn from(state: &SelectionState) -> Self {
        SelectionSnapshot {
            favorites: state.favorites.ids().to_vec(),
            cart: state.cart.items().to_vec(),
            compare_list: state.compare.ids().to_vec(),
            totals: CartTotals::from(&state.cart),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The selection state engine.
pub struct SelectionEngine {
    catalog: Arc<Catalog>,
    auth: Arc<dyn AuthSignal>,
    notifier: Arc<dyn Notifier>,
    state: SelectionState,
}

impl std::fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("catalog_len", &self.catalog.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SelectionEngine {
    /// Starts a session with empty favorites, cart and compare list.
    pub fn new(
        catalog: Arc<Catalog>,
        auth: Arc<dyn AuthSignal>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        SelectionEngine {
            catalog,
            auth,
            notifier,
            state: SelectionState::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    /// Stars a product. Requires a signed-in user.
    pub fn add_to_favorites(&mut self, product_id: &str) -> SelectionResult<()> {
        let user = self.require_user("add favorites")?;

        let inserted = self.state.favorites.insert(product_id);
        debug!(user_id = %user.id, product_id, inserted, "Added to favorites");
        self.notifier.notify(Notice::success("Added to favorites"));
        Ok(())
    }

    /// Unstars a product. No-op if it was not starred.
    pub fn remove_from_favorites(&mut self, product_id: &str) -> bool {
        let removed = self.state.favorites.remove(product_id);
        if removed {
            debug!(product_id, "Removed from favorites");
            self.notifier.notify(Notice::success("Removed from favorites"));
        }
        removed
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.state.favorites.contains(product_id)
    }

    /// Heart button on the product card. Returns the new membership.
    pub fn toggle_favorite(&mut self, product_id: &str) -> SelectionResult<bool> {
        if self.is_favorite(product_id) {
            self.remove_from_favorites(product_id);
            Ok(false)
        } else {
            self.add_to_favorites(product_id)?;
            Ok(true)
        }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds `quantity` of `product`. Requires a signed-in user and a positive
    /// quantity.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> SelectionResult<()> {
        let user = self.require_user("add items to cart")?;

        if let Err(e) = self.state.cart.add_item(product, quantity) {
            return Err(self.report(SelectionError::Validation(e)));
        }

        debug!(user_id = %user.id, product_id = %product.id, quantity, "Added to cart");
        self.notifier.notify(Notice::success("Added to cart"));
        Ok(())
    }

    /// Removes a cart line. No-op if absent.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let removed = self.state.cart.remove_item(product_id);
        if removed {
            debug!(product_id, "Removed from cart");
            self.notifier.notify(Notice::success("Removed from cart"));
        }
        removed
    }

    /// Sets a line's quantity; zero or below removes the line, and values
    /// above `MAX_ITEM_QUANTITY` are clamped with an info notice. No-op if
    /// the product is not in the cart.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let updated = self.state.cart.update_quantity(product_id, quantity);
        if updated {
            if quantity > MAX_ITEM_QUANTITY {
                self.notifier.notify(Notice::info(format!(
                    "Quantity limited to {}",
                    MAX_ITEM_QUANTITY
                )));
            }
            debug!(product_id, quantity, "Cart quantity updated");
        }
        updated
    }

    pub fn clear_cart(&mut self) {
        debug!(lines = self.state.cart.item_count(), "Cart cleared");
        self.state.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Compare
    // -------------------------------------------------------------------------

    /// Appends a product to the compare list.
    pub fn add_to_compare(&mut self, product_id: &str) -> SelectionResult<()> {
        if let Err(e) = self.state.compare.add(product_id) {
            return Err(self.report(e));
        }

        debug!(product_id, size = self.state.compare.len(), "Added to comparison");
        self.notifier.notify(Notice::success("Added to comparison"));
        Ok(())
    }

    /// Removes a product from the compare list. No-op if absent.
    pub fn remove_from_compare(&mut self, product_id: &str) -> bool {
        let removed = self.state.compare.remove(product_id);
        if removed {
            debug!(product_id, "Removed from comparison");
            self.notifier.notify(Notice::success("Removed from comparison"));
        }
        removed
    }

    pub fn is_in_compare(&self, product_id: &str) -> bool {
        self.state.compare.contains(product_id)
    }

    /// Compare button on the product card. Returns the new membership.
    pub fn toggle_compare(&mut self, product_id: &str) -> SelectionResult<bool> {
        if self.is_in_compare(product_id) {
            self.remove_from_compare(product_id);
            Ok(false)
        } else {
            self.add_to_compare(product_id)?;
            Ok(true)
        }
    }

    pub fn clear_compare(&mut self) {
        self.state.compare.clear();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn get_product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.catalog.get(product_id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    pub fn favorites(&self) -> &[String] {
        self.state.favorites.ids()
    }

    pub fn compare_list(&self) -> &[String] {
        self.state.compare.ids()
    }

    /// Starred products that exist in the catalog, in starring order.
    pub fn favorite_products(&self) -> Vec<&Product> {
        self.catalog.resolve(self.state.favorites.ids())
    }

    /// Compared products that exist in the catalog, in insertion order.
    pub fn compared_products(&self) -> Vec<&Product> {
        self.catalog.resolve(self.state.compare.ids())
    }

    /// Σ price × quantity, recomputed on every call.
    pub fn cart_total(&self) -> Money {
        self.state.cart.total()
    }

    /// Σ quantity, recomputed on every call.
    pub fn cart_items_count(&self) -> i64 {
        self.state.cart.total_quantity()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::from(&self.state)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn require_user(&self, action: &str) -> SelectionResult<User> {
        match self.auth.current() {
            AuthState::Authenticated { user } => Ok(user),
            AuthState::Anonymous => Err(self.report(SelectionError::AuthRequired {
                action: action.to_string(),
            })),
        }
    }

    /// Sends the notice for a declined operation and hands the error back.
    fn report(&self, err: SelectionError) -> SelectionError {
        let notice = match &err {
            SelectionError::DuplicateEntry { .. } => Notice::info("Product already in comparison"),
            other => Notice::error(other.to_string()),
        };
        debug!(error = %err, "Selection operation declined");
        self.notifier.notify(notice);
        err
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
