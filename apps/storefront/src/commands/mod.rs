//! # Commands Module
//!
//! All commands exposed to the web dashboard.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (Invoke enum, dispatch)
//! ├── product.rs      ◄─── Browse, product detail, categories
//! ├── favorites.rs    ◄─── Heart button, Favorites page
//! ├── cart.rs         ◄─── Cart manipulation
//! ├── compare.rs      ◄─── Compare button, comparison table
//! ├── auth.rs         ◄─── OTP sign-up, sign-out, profile
//! ├── preferences.rs  ◄─── Notification preferences
//! └── config.rs       ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin line:                                                            │
//! │  {"command":"add_to_cart","productId":"omega-3","quantity":2}           │
//! │         │                                                               │
//! │         │ serde (tag = "command")                                       │
//! │         ▼                                                               │
//! │  Invoke::AddToCart { product_id, quantity }                             │
//! │         │                                                               │
//! │         │ dispatch() hands each command only the state it needs        │
//! │         ▼                                                               │
//! │  cart::add_to_cart(&session, &config, ..) -> Result<CartResponse, ..>   │
//! │         │                                                               │
//! │         │ + notices drained from the session                           │
//! │         ▼                                                               │
//! │  stdout line:                                                           │
//! │  {"ok":true,"data":{...},"notices":[{"level":"success",...}]}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod compare;
pub mod config;
pub mod favorites;
pub mod preferences;
pub mod product;

use medicare_auth::SignUpForm;
use medicare_core::query::ProductQuery;
use medicare_core::Notice;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::state::PreferencesPatch;
use crate::Storefront;

/// A command sent by the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    tag = "command",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Invoke {
    // Products
    BrowseProducts {
        #[serde(flatten)]
        query: ProductQuery,
    },
    GetProduct {
        product_id: String,
    },
    GetCategories,

    // Favorites
    GetFavorites,
    AddToFavorites {
        product_id: String,
    },
    RemoveFromFavorites {
        product_id: String,
    },
    ToggleFavorite {
        product_id: String,
    },

    // Cart
    GetCart,
    AddToCart {
        product_id: String,
        #[serde(default)]
        quantity: Option<i64>,
    },
    UpdateCartQuantity {
        product_id: String,
        quantity: i64,
    },
    RemoveFromCart {
        product_id: String,
    },
    ClearCart,

    // Compare
    GetCompareList,
    AddToCompare {
        product_id: String,
    },
    RemoveFromCompare {
        product_id: String,
    },
    ToggleCompare {
        product_id: String,
    },
    ClearCompare,

    // Auth
    StartSignUp {
        #[serde(flatten)]
        form: SignUpForm,
    },
    VerifyOtp {
        phone: String,
        code: String,
    },
    SignOut,
    CurrentUser,
    UpdateProfile {
        full_name: String,
    },

    // Preferences & config
    GetPreferences,
    UpdatePreferences {
        #[serde(flatten)]
        patch: PreferencesPatch,
    },
    GetConfig,
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    /// Notices raised while handling the command, oldest first.
    pub notices: Vec<Notice>,
}

impl Response {
    pub fn from_result(result: Result<Value, ApiError>, notices: Vec<Notice>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
                notices,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
                notices,
            },
        }
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Routes a command to its handler.
pub fn dispatch(app: &Storefront, invoke: Invoke) -> Result<Value, ApiError> {
    let Storefront {
        config,
        session,
        account,
        preferences,
    } = app;

    match invoke {
        Invoke::BrowseProducts { query } => to_data(product::browse_products(session, query)?),
        Invoke::GetProduct { product_id } => to_data(product::get_product(session, &product_id)?),
        Invoke::GetCategories => to_data(product::get_categories(session)),

        Invoke::GetFavorites => to_data(favorites::get_favorites(session)),
        Invoke::AddToFavorites { product_id } => {
            to_data(favorites::add_to_favorites(session, &product_id)?)
        }
        Invoke::RemoveFromFavorites { product_id } => {
            to_data(favorites::remove_from_favorites(session, &product_id))
        }
        Invoke::ToggleFavorite { product_id } => {
            to_data(favorites::toggle_favorite(session, &product_id)?)
        }

        Invoke::GetCart => to_data(cart::get_cart(session, config)),
        Invoke::AddToCart {
            product_id,
            quantity,
        } => to_data(cart::add_to_cart(session, config, &product_id, quantity)?),
        Invoke::UpdateCartQuantity {
            product_id,
            quantity,
        } => to_data(cart::update_cart_quantity(
            session,
            config,
            &product_id,
            quantity,
        )),
        Invoke::RemoveFromCart { product_id } => {
            to_data(cart::remove_from_cart(session, config, &product_id))
        }
        Invoke::ClearCart => to_data(cart::clear_cart(session, config)),

        Invoke::GetCompareList => to_data(compare::get_compare_list(session)),
        Invoke::AddToCompare { product_id } => {
            to_data(compare::add_to_compare(session, &product_id)?)
        }
        Invoke::RemoveFromCompare { product_id } => {
            to_data(compare::remove_from_compare(session, &product_id))
        }
        Invoke::ToggleCompare { product_id } => {
            to_data(compare::toggle_compare(session, &product_id)?)
        }
        Invoke::ClearCompare => to_data(compare::clear_compare(session)),

        Invoke::StartSignUp { form } => to_data(auth::start_sign_up(account, session, &form)?),
        Invoke::VerifyOtp { phone, code } => {
            to_data(auth::verify_otp(account, session, &phone, &code)?)
        }
        Invoke::SignOut => to_data(auth::sign_out(account)),
        Invoke::CurrentUser => to_data(auth::current_user(account)),
        Invoke::UpdateProfile { full_name } => {
            to_data(auth::update_profile(account, session, &full_name)?)
        }

        Invoke::GetPreferences => to_data(preferences::get_preferences(preferences)),
        Invoke::UpdatePreferences { patch } => {
            to_data(preferences::update_preferences(preferences, patch))
        }
        Invoke::GetConfig => to_data(config::get_config(config)),
    }
}

/// Parses and runs one request line. Never fails: errors become responses.
pub fn handle_line(app: &Storefront, line: &str) -> Response {
    let result = serde_json::from_str::<Invoke>(line)
        .map_err(ApiError::from)
        .and_then(|invoke| dispatch(app, invoke));

    if let Err(e) = &result {
        warn!(code = ?e.code, message = %e.message, "Command failed");
    }

    Response::from_result(result, app.session.drain_notices())
}
