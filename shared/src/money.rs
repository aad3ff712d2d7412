//! Money helpers using rust_decimal for precision
//!
//! All monetary quantities are `Decimal` values carrying at most two decimal
//! places. Every calculation rounds at its own boundary (half-up to the
//! cent), so downstream sums stay exact.

use crate::error::{SplitError, SplitResult};
use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed amount per payment (1,000,000.00)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Round a monetary value to the cent, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate an amount at an input boundary: non-negative and within bounds
pub fn require_amount(value: Decimal, field_name: &str) -> SplitResult<()> {
    if value < Decimal::ZERO {
        return Err(SplitError::configuration(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(SplitError::configuration(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validate a percentage rate at an input boundary: within [0, 100]
pub fn require_percent(value: Decimal, field_name: &str) -> SplitResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(SplitError::configuration(format!(
            "{} must be between 0 and 100, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Apply a percentage rate to an amount, rounded to the cent
#[inline]
pub fn apply_percent(amount: Decimal, percent: Decimal) -> Decimal {
    round_money(amount * percent / Decimal::ONE_HUNDRED)
}
