//! Money bounds and overflow-checked arithmetic.
//!
//! `Decimal`'s operators panic on overflow; amounts built from client input go
//! through these helpers instead.

use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};

/// Largest single price, cost or amount accepted (10^12).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn out_of_range() -> DomainError {
    DomainError::validation("amount out of range")
}

/// `0 <= value <= MAX_AMOUNT`.
pub fn validate_amount(field: &str, value: Decimal) -> DomainResult<()> {
    if value < Decimal::ZERO {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    if value > MAX_AMOUNT {
        return Err(DomainError::validation(format!(
            "{field} cannot exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// `quantity × price`.
pub fn extend(quantity: u32, price: Decimal) -> DomainResult<Decimal> {
    Decimal::from(quantity)
        .checked_mul(price)
        .ok_or_else(out_of_range)
}

pub fn checked_add(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_add(b).ok_or_else(out_of_range)
}

pub fn checked_sub(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> DomainResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
}
