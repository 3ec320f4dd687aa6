//! # Money Module
//!
//! Catalog prices and cart totals as integer minor units (paise).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Three ₹0.10 sachets as f64:  0.1 + 0.1 + 0.1 = 0.30000000000000004     │
//! │  Three ₹0.10 sachets as paise:   10 +  10 +  10 = 30                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering with a currency symbol belongs to the storefront config
//! (`ConfigState::format_currency`), which works on `cents()`.
//!
//! ## Usage
//! ```rust
//! use medicare_core::money::Money;
//!
//! let price = Money::from_cents(1299);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.cents(), 3897);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// A monetary value in the smallest currency unit.
///
/// ```text
/// Product.price_cents ──► CartItem::line_total ──► Cart::total ──► CartTotals
/// ```
///
/// Cart quantities are capped at `MAX_ITEM_QUANTITY`, so line totals and
/// their sum stay far from `i64` limits for any realistic catalog price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Unit price × quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let unit = Money::from_cents(299);
        assert_eq!(unit.multiply_quantity(3), Money::from_cents(897));
        assert!(unit.multiply_quantity(0).is_zero());
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(total, Money::default());

        let total: Money = [10, 10, 10].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 30);
    }

    #[test]
    fn test_orders_by_amount() {
        assert!(Money::from_cents(499) < Money::from_cents(4999));
    }
}
