//! Stock level policy.
//!
//! An item is low on stock when its quantity is below its own
//! `minStockLevel`, or below [`DEFAULT_LOW_STOCK_THRESHOLD`] when it has none.
//! Over-stock mirrors this with `maxStockLevel` / [`DEFAULT_OVER_STOCK_THRESHOLD`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;
pub const DEFAULT_OVER_STOCK_THRESHOLD: u32 = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
    OverStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::InStock => "in_stock",
            StockStatus::OverStock => "over_stock",
        }
    }
}

pub fn is_low_stock(quantity: u32, min_stock_level: Option<u32>) -> bool {
    quantity < min_stock_level.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
}

pub fn is_over_stock(quantity: u32, max_stock_level: Option<u32>) -> bool {
    quantity > max_stock_level.unwrap_or(DEFAULT_OVER_STOCK_THRESHOLD)
}

pub fn classify(quantity: u32, min_stock_level: Option<u32>, max_stock_level: Option<u32>) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if is_low_stock(quantity, min_stock_level) {
        StockStatus::LowStock
    } else if is_over_stock(quantity, max_stock_level) {
        StockStatus::OverStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_threshold_applies_without_item_level() {
        assert!(is_low_stock(9, None));
        assert!(!is_low_stock(10, None));
        assert!(is_over_stock(101, None));
        assert!(!is_over_stock(100, None));
    }

    #[test]
    fn item_level_overrides_fixed_threshold() {
        assert!(!is_low_stock(9, Some(5)));
        assert!(is_low_stock(19, Some(20)));
        assert!(!is_over_stock(500, Some(1000)));
    }

    #[test]
    fn classify_orders_checks() {
        assert_eq!(classify(0, None, None), StockStatus::OutOfStock);
        assert_eq!(classify(3, None, None), StockStatus::LowStock);
        assert_eq!(classify(50, None, None), StockStatus::InStock);
        assert_eq!(classify(150, None, None), StockStatus::OverStock);
        assert_eq!(classify(150, None, Some(1000)), StockStatus::InStock);
    }
}
