//! # Favorites Commands
//!
//! Heart button on the product card and the Favorites page.

use medicare_core::{Product, SelectionEngine};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    /// Starred ids in starring order.
    pub product_ids: Vec<String>,
    /// Starred products found in the catalog.
    pub products: Vec<Product>,
}

impl From<&SelectionEngine> for FavoritesResponse {
    fn from(engine: &SelectionEngine) -> Self {
        FavoritesResponse {
            product_ids: engine.favorites().to_vec(),
            products: engine.favorite_products().into_iter().cloned().collect(),
        }
    }
}

pub fn get_favorites(session: &SessionState) -> FavoritesResponse {
    debug!("get_favorites command");
    session.with_engine(|e| FavoritesResponse::from(e))
}

/// Stars a product. Requires a signed-in user.
pub fn add_to_favorites(
    session: &SessionState,
    product_id: &str,
) -> Result<FavoritesResponse, ApiError> {
    debug!(product_id, "add_to_favorites command");

    session.with_engine_mut(|e| {
        e.add_to_favorites(product_id)?;
        Ok::<FavoritesResponse, ApiError>(FavoritesResponse::from(&*e))
    })
}

pub fn remove_from_favorites(session: &SessionState, product_id: &str) -> FavoritesResponse {
    debug!(product_id, "remove_from_favorites command");

    session.with_engine_mut(|e| {
        e.remove_from_favorites(product_id);
        FavoritesResponse::from(&*e)
    })
}

/// Stars or unstars a product; starring requires a signed-in user.
pub fn toggle_favorite(
    session: &SessionState,
    product_id: &str,
) -> Result<FavoritesResponse, ApiError> {
    debug!(product_id, "toggle_favorite command");

    session.with_engine_mut(|e| {
        e.toggle_favorite(product_id)?;
        Ok::<FavoritesResponse, ApiError>(FavoritesResponse::from(&*e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{sign_in, test_account, test_session_for};
    use crate::error::ErrorCode;

    #[test]
    fn test_anonymous_cannot_star() {
        let account = test_account();
        let session = test_session_for(&account);

        let err = add_to_favorites(&session, "zinc-50").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "Please sign in to add favorites");
        assert!(get_favorites(&session).product_ids.is_empty());
    }

    #[test]
    fn test_toggle_and_resolve() {
        let account = test_account();
        let session = test_session_for(&account);
        sign_in(&account);

        toggle_favorite(&session, "zinc-50").unwrap();
        let favorites = add_to_favorites(&session, "aloe-gel").unwrap();
        assert_eq!(favorites.product_ids, vec!["zinc-50", "aloe-gel"]);
        assert_eq!(favorites.products.len(), 2);

        let favorites = toggle_favorite(&session, "zinc-50").unwrap();
        assert_eq!(favorites.product_ids, vec!["aloe-gel"]);

        let favorites = remove_from_favorites(&session, "aloe-gel");
        assert!(favorites.products.is_empty());
    }

    #[test]
    fn test_sign_out_keeps_favorites_but_blocks_new_ones() {
        let account = test_account();
        let session = test_session_for(&account);
        sign_in(&account);
        add_to_favorites(&session, "zinc-50").unwrap();

        account.gate().sign_out();

        assert_eq!(get_favorites(&session).product_ids, vec!["zinc-50"]);
        assert!(add_to_favorites(&session, "aloe-gel").is_err());
        assert_eq!(remove_from_favorites(&session, "zinc-50").product_ids.len(), 0);
    }
}
