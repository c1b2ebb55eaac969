//! Sale totals: `total = subtotal + tax - discount`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpsystem_core::{DomainError, DomainResult, money};

use crate::sale::SaleLine;

/// Flat sales tax applied to every sale (10 %).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Compute totals for a set of lines and a discount.
///
/// The discount must lie within `0..=subtotal + tax`, so `total` is never
/// negative.
pub fn compute(lines: &[SaleLine], discount: Decimal) -> DomainResult<Totals> {
    let subtotal = lines
        .iter()
        .map(SaleLine::line_total)
        .try_fold(Decimal::ZERO, |acc, line| money::checked_add(acc, line?))?;
    let tax = subtotal
        .checked_mul(TAX_RATE)
        .ok_or_else(|| DomainError::validation("amount out of range"))?
        .round_dp(2);
    let gross = money::checked_add(subtotal, tax)?;

    if discount < Decimal::ZERO {
        return Err(DomainError::validation("discount cannot be negative"));
    }
    if discount > gross {
        return Err(DomainError::validation(
            "discount cannot exceed subtotal plus tax",
        ));
    }

    Ok(Totals {
        subtotal,
        tax,
        discount,
        total: gross - discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpsystem_core::ItemId;

    fn line(item: u64, quantity: u32, price: i64) -> SaleLine {
        SaleLine::new(ItemId::new(item), format!("Товар {item}"), quantity, Decimal::new(price, 0))
            .unwrap()
    }

    #[test]
    fn tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, Decimal::new(1, 1));
    }

    #[test]
    fn seed_sale_totals() {
        let lines = vec![line(3, 3, 1200), line(1, 1, 1500)];
        let totals = compute(&lines, Decimal::new(100, 0)).unwrap();

        assert_eq!(totals.subtotal, Decimal::new(5100, 0));
        assert_eq!(totals.tax, Decimal::new(510, 0));
        assert_eq!(totals.total, Decimal::new(5510, 0));
    }

    #[test]
    fn discount_bounds() {
        let lines = vec![line(2, 2, 2000)];
        assert!(compute(&lines, Decimal::new(-1, 0)).is_err());
        assert!(compute(&lines, Decimal::new(4401, 0)).is_err());

        let free = compute(&lines, Decimal::new(4400, 0)).unwrap();
        assert_eq!(free.total, Decimal::ZERO);
    }

    #[test]
    fn overflowing_lines_are_rejected() {
        let max_line = SaleLine {
            item_id: ItemId::new(1),
            name: "Товар 1".into(),
            quantity: 1,
            price: Decimal::MAX,
            total: Decimal::MAX,
        };

        let err = compute(&[max_line.clone(), max_line.clone()], Decimal::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let doubled = SaleLine {
            quantity: 2,
            ..max_line
        };
        assert!(compute(&[doubled], Decimal::ZERO).is_err());
    }

    #[test]
    fn empty_lines_total_zero() {
        let totals = compute(&[], Decimal::ZERO).unwrap();
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
