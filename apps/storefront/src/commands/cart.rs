//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐                                         │
//! │  │  Empty   │────►│ In Cart  │────► (checkout lives elsewhere)         │
//! │  │  Cart    │     │          │                                         │
//! │  └──────────┘     └──────────┘                                         │
//! │       ▲                │                                                │
//! │       │           add_to_cart        (signed-in only)                  │
//! │       │           update_cart_quantity                                 │
//! │       │           remove_from_cart                                     │
//! │       │                │                                                │
//! │       └─────────── clear_cart                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medicare_core::{CartItem, CartTotals, SelectionEngine};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    /// Total formatted for display, e.g. "₹25.98".
    pub formatted_total: String,
}

impl CartResponse {
    fn build(engine: &SelectionEngine, config: &ConfigState) -> Self {
        let totals = CartTotals::from(engine.cart());
        CartResponse {
            items: engine.cart().items().to_vec(),
            formatted_total: config.format_currency(totals.total_cents),
            totals,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    session.with_engine(|e| CartResponse::build(e, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Requires a signed-in user
/// - If product already in cart: quantity increases
/// - The product is snapshotted at time of adding
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    session: &SessionState,
    config: &ConfigState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "add_to_cart command");

    let product = session
        .catalog()
        .get(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    session.with_engine_mut(|e| {
        e.add_to_cart(&product, quantity)?;
        Ok::<CartResponse, ApiError>(CartResponse::build(e, config))
    })
}

/// Sets the quantity of a cart line. Zero or below removes it; unknown ids
/// are ignored.
pub fn update_cart_quantity(
    session: &SessionState,
    config: &ConfigState,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id, quantity, "update_cart_quantity command");

    session.with_engine_mut(|e| {
        e.update_cart_quantity(product_id, quantity);
        CartResponse::build(e, config)
    })
}

/// Removes a cart line.
pub fn remove_from_cart(
    session: &SessionState,
    config: &ConfigState,
    product_id: &str,
) -> CartResponse {
    debug!(product_id, "remove_from_cart command");

    session.with_engine_mut(|e| {
        e.remove_from_cart(product_id);
        CartResponse::build(e, config)
    })
}

/// Clears all items from the cart.
pub fn clear_cart(session: &SessionState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    session.with_engine_mut(|e| {
        e.clear_cart();
        CartResponse::build(e, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{sign_in, test_account, test_session_for};
    use crate::error::ErrorCode;
    use medicare_core::Notice;

    #[test]
    fn test_anonymous_add_is_refused() {
        let config = ConfigState::default();
        let account = test_account();
        let session = test_session_for(&account);

        let err = add_to_cart(&session, &config, "omega-3", None).unwrap_err();

        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "Please sign in to add items to cart");
        assert!(get_cart(&session, &config).items.is_empty());
        assert_eq!(
            session.drain_notices(),
            vec![Notice::error("Please sign in to add items to cart")]
        );
    }

    #[test]
    fn test_add_update_remove() {
        let config = ConfigState::default();
        let account = test_account();
        let session = test_session_for(&account);
        sign_in(&account);

        add_to_cart(&session, &config, "omega-3", Some(2)).unwrap();
        let cart = add_to_cart(&session, &config, "omega-3", Some(3)).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.totals.total_quantity, 5);
        assert_eq!(cart.totals.total_cents, 5 * 2499);
        assert_eq!(cart.formatted_total, "₹124.95");

        let cart = update_cart_quantity(&session, &config, "omega-3", 1);
        assert_eq!(cart.totals.total_quantity, 1);

        let cart = update_cart_quantity(&session, &config, "omega-3", 0);
        assert!(cart.items.is_empty());
        assert_eq!(cart.formatted_total, "₹0.00");
    }

    #[test]
    fn test_add_unknown_product() {
        let config = ConfigState::default();
        let account = test_account();
        let session = test_session_for(&account);
        sign_in(&account);

        let err = add_to_cart(&session, &config, "ghost", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_clear_cart() {
        let config = ConfigState::default();
        let account = test_account();
        let session = test_session_for(&account);
        sign_in(&account);
        add_to_cart(&session, &config, "zinc-50", None).unwrap();
        add_to_cart(&session, &config, "aloe-gel", None).unwrap();

        let cart = clear_cart(&session, &config);

        assert!(cart.items.is_empty());
        assert_eq!(cart.totals, CartTotals::default());
    }
}
