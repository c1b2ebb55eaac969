//! Field-level validation rules for inventory input.

use mpsystem_core::{DomainError, DomainResult};

pub const SKU_MIN_LEN: usize = 3;
pub const SKU_MAX_LEN: usize = 50;

/// SKU: 3..=50 chars of ASCII letters, digits, `-` or `_`.
pub fn validate_sku(sku: &str) -> DomainResult<()> {
    let len = sku.chars().count();
    if !(SKU_MIN_LEN..=SKU_MAX_LEN).contains(&len) {
        return Err(DomainError::validation(format!(
            "sku must be {SKU_MIN_LEN}-{SKU_MAX_LEN} characters"
        )));
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::validation(
            "sku may only contain letters, digits, '-' and '_'",
        ));
    }

    Ok(())
}

pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

/// Prices and costs lie within `0..=MAX_AMOUNT`.
pub use mpsystem_core::money::validate_amount;

/// Quantities arrive as signed JSON numbers; stored quantities are `u32`.
pub fn validate_quantity(value: i64) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::validation("quantity must be a non-negative integer"))
}

pub fn validate_stock_levels(min: Option<u32>, max: Option<u32>) -> DomainResult<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(DomainError::validation(
                "minStockLevel cannot exceed maxStockLevel",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn sku_accepts_seed_style_codes() {
        assert!(validate_sku("SKU001").is_ok());
        assert!(validate_sku("box_12-b").is_ok());
    }

    #[test]
    fn sku_rejects_bad_length_and_characters() {
        assert!(validate_sku("AB").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
        assert!(validate_sku("SKU 001").is_err());
        assert!(validate_sku("SKU#1").is_err());
    }

    #[test]
    fn amounts_must_not_be_negative() {
        assert!(validate_amount("price", Decimal::ZERO).is_ok());
        assert!(validate_amount("price", Decimal::new(1500, 0)).is_ok());
        assert!(validate_amount("price", Decimal::new(-1, 2)).is_err());
        assert!(validate_amount("price", Decimal::from(10_u64.pow(13))).is_err());
    }

    #[test]
    fn quantity_rejects_negative_values() {
        assert_eq!(validate_quantity(12).unwrap(), 12);
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn stock_levels_must_be_ordered() {
        assert!(validate_stock_levels(Some(5), Some(1000)).is_ok());
        assert!(validate_stock_levels(Some(10), None).is_ok());
        assert!(validate_stock_levels(Some(20), Some(10)).is_err());
    }
}
