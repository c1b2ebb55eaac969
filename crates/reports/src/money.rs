//! Decimal helpers shared by the reports.
//!
//! Accumulation is checked: a total past `Decimal::MAX` surfaces as
//! [`ReportError::Validation`] rather than a panic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ReportError, ReportResult};

fn out_of_range() -> ReportError {
    ReportError::validation("report totals exceed the supported amount range")
}

/// Round to cents, halves away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `*acc += value`.
pub fn add(acc: &mut Decimal, value: Decimal) -> ReportResult<()> {
    *acc = acc.checked_add(value).ok_or_else(out_of_range)?;
    Ok(())
}

/// `a - b`.
pub fn sub(a: Decimal, b: Decimal) -> ReportResult<Decimal> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

/// `numerator / denominator`, zero when the denominator is zero.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> ReportResult<Decimal> {
    if denominator.is_zero() {
        return Ok(Decimal::ZERO);
    }
    numerator.checked_div(denominator).ok_or_else(out_of_range)
}

/// `part / whole × 100` rounded to cents, zero when `whole` is zero.
pub fn percent(part: Decimal, whole: Decimal) -> ReportResult<Decimal> {
    safe_div(part, whole)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round2)
        .ok_or_else(out_of_range)
}
