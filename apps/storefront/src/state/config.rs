//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MEDICARE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use medicare_core::{Catalog, DEFAULT_PHONE_PREFIX, OTP_TTL_SECS};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;

use crate::error::ApiError;

/// Configuration loading failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read catalog {path}: {reason}")]
    CatalogUnreadable { path: String, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the dashboard header
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Country code prepended to sign-up phone numbers
    pub phone_prefix: String,

    /// OTP lifetime in seconds
    pub otp_ttl_secs: i64,

    /// Catalog JSON to load instead of the built-in one
    #[ts(as = "Option<String>")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "MediCare"
    /// - Currency: INR (₹)
    /// - Phone prefix: +91
    /// - OTP lifetime: 5 minutes
    /// - Catalog: built in
    fn default() -> Self {
        ConfigState {
            store_name: "MediCare".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            phone_prefix: DEFAULT_PHONE_PREFIX.to_string(),
            otp_ttl_secs: OTP_TTL_SECS,
            catalog_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDICARE_STORE_NAME`: Override store name
    /// - `MEDICARE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `MEDICARE_PHONE_PREFIX`: Override the phone country code
    /// - `MEDICARE_OTP_TTL_SECS`: OTP lifetime in seconds (positive integer)
    /// - `MEDICARE_CATALOG_PATH`: Load the catalog from this JSON file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("MEDICARE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("MEDICARE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(prefix) = lookup("MEDICARE_PHONE_PREFIX") {
            if !prefix.starts_with('+') || prefix.len() < 2 {
                return Err(ConfigError::InvalidValue {
                    key: "MEDICARE_PHONE_PREFIX".to_string(),
                    value: prefix,
                });
            }
            config.phone_prefix = prefix;
        }

        if let Some(ttl) = lookup("MEDICARE_OTP_TTL_SECS") {
            config.otp_ttl_secs = match ttl.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MEDICARE_OTP_TTL_SECS".to_string(),
                        value: ttl,
                    })
                }
            };
        }

        if let Some(path) = lookup("MEDICARE_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Loads the configured catalog, falling back to the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, ApiError> {
        let Some(path) = &self.catalog_path else {
            let catalog = Catalog::load_default()?;
            info!(products = catalog.len(), "Built-in catalog loaded");
            return Ok(catalog);
        };

        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let catalog = Catalog::from_json(&json)?;

        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1299), "₹12.99");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1299), "₹12.99");
        assert_eq!(config.format_currency(5), "₹0.05");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-450), "-₹4.50");
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ConfigState::from_lookup(|_| None).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.otp_ttl_secs, 300);
        assert_eq!(config.phone_prefix, "+91");
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("MEDICARE_STORE_NAME", "MediCare Koramangala"),
            ("MEDICARE_OTP_TTL_SECS", "120"),
            ("MEDICARE_CATALOG_PATH", "/tmp/products.json"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "MediCare Koramangala");
        assert_eq!(config.otp_ttl_secs, 120);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/tmp/products.json"))
        );
    }

    #[test]
    fn test_invalid_ttl_rejected() {
        for bad in ["0", "-5", "soon"] {
            let result = ConfigState::from_lookup(lookup_from(&[("MEDICARE_OTP_TTL_SECS", bad)]));
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        }
    }

    #[test]
    fn test_invalid_phone_prefix_rejected() {
        let result = ConfigState::from_lookup(lookup_from(&[("MEDICARE_PHONE_PREFIX", "91")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_builtin_catalog() {
        let catalog = ConfigState::default().load_catalog().unwrap();
        assert!(catalog.contains("vit-c-1000"));
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = ConfigState {
            catalog_path: Some(PathBuf::from("/nonexistent/medicare/products.json")),
            ..ConfigState::default()
        };

        let err = config.load_catalog().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }
}
