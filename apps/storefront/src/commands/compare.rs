//! # Compare Commands
//!
//! Compare button on the product card and the comparison table. Open to
//! anonymous visitors.

use medicare_core::{Product, SelectionEngine, MAX_COMPARE_ITEMS};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Compared ids in insertion order.
    pub product_ids: Vec<String>,
    /// One column per product found in the catalog.
    pub products: Vec<Product>,
    pub max_items: usize,
}

impl From<&SelectionEngine> for CompareResponse {
    fn from(engine: &SelectionEngine) -> Self {
        CompareResponse {
            product_ids: engine.compare_list().to_vec(),
            products: engine.compared_products().into_iter().cloned().collect(),
            max_items: MAX_COMPARE_ITEMS,
        }
    }
}

pub fn get_compare_list(session: &SessionState) -> CompareResponse {
    debug!("get_compare_list command");
    session.with_engine(|e| CompareResponse::from(e))
}

pub fn add_to_compare(session: &SessionState, product_id: &str) -> Result<CompareResponse, ApiError> {
    debug!(product_id, "add_to_compare command");

    session.with_engine_mut(|e| {
        e.add_to_compare(product_id)?;
        Ok::<CompareResponse, ApiError>(CompareResponse::from(&*e))
    })
}

pub fn remove_from_compare(session: &SessionState, product_id: &str) -> CompareResponse {
    debug!(product_id, "remove_from_compare command");

    session.with_engine_mut(|e| {
        e.remove_from_compare(product_id);
        CompareResponse::from(&*e)
    })
}

pub fn toggle_compare(session: &SessionState, product_id: &str) -> Result<CompareResponse, ApiError> {
    debug!(product_id, "toggle_compare command");

    session.with_engine_mut(|e| {
        e.toggle_compare(product_id)?;
        Ok::<CompareResponse, ApiError>(CompareResponse::from(&*e))
    })
}

pub fn clear_compare(session: &SessionState) -> CompareResponse {
    debug!("clear_compare command");

    session.with_engine_mut(|e| {
        e.clear_compare();
        CompareResponse::from(&*e)
    })
}
