//! Fee calculation using rust_decimal for precision
//!
//! Pure functions only: no I/O, no hidden state. Every function rounds to
//! the cent at its own boundary (half-up), and the quantities compose so
//! that the parts always sum to the whole:
//!
//! ```text
//! final     = base + installment_fee
//! platform  = platform_fee + installment_fee
//! organizer = base - platform_fee - affiliate_commission
//! organizer + platform + affiliate_commission == final
//! ```
//!
//! The platform fee is absorbed out of the organizer's share, never added on
//! top of the payer-visible charge.

use rust_decimal::Decimal;
use shared::error::{SplitError, SplitResult};
use shared::models::{CommissionSpec, RateSchedule, SplitComputation};
use shared::money::{apply_percent, require_amount, round_money};

/// Installment surcharge for a given installment count
///
/// Zero for a single installment. Counts beyond the schedule's highest
/// defined entry use the highest entry's rate; see
/// [`RateSchedule::surcharge_rate`].
pub fn installment_fee(
    schedule: &RateSchedule,
    base_amount: Decimal,
    installments: u32,
) -> SplitResult<Decimal> {
    let rate = schedule.surcharge_rate(installments)?;
    Ok(apply_percent(base_amount, rate))
}

/// Administrative fee the platform retains, independent of installment count
pub fn platform_fee(schedule: &RateSchedule, base_amount: Decimal) -> Decimal {
    apply_percent(base_amount, schedule.admin_fee_percent)
}

/// Amount actually charged to the payer: base plus installment surcharge
pub fn final_value(
    schedule: &RateSchedule,
    base_amount: Decimal,
    installments: u32,
) -> SplitResult<Decimal> {
    Ok(base_amount + installment_fee(schedule, base_amount, installments)?)
}

/// Platform's total take: administrative fee plus installment surcharge.
/// Both accrue to the platform, never to the organizer.
pub fn platform_value(
    schedule: &RateSchedule,
    base_amount: Decimal,
    installments: u32,
) -> SplitResult<Decimal> {
    Ok(platform_fee(schedule, base_amount) + installment_fee(schedule, base_amount, installments)?)
}

/// Affiliate commission for a sale
///
/// Percentage mode applies to the base price; fixed mode is rejected (not
/// clamped) when it exceeds the base price.
pub fn affiliate_value(base_amount: Decimal, spec: &CommissionSpec) -> SplitResult<Decimal> {
    spec.validate_against(base_amount)?;
    Ok(match spec {
        CommissionSpec::Percentage(value) => apply_percent(base_amount, *value),
        CommissionSpec::Fixed(value) => round_money(*value),
    })
}

/// Organizer's share before any affiliate deduction
pub fn organizer_value(schedule: &RateSchedule, base_amount: Decimal) -> Decimal {
    base_amount - platform_fee(schedule, base_amount)
}

/// Organizer's share after the affiliate commission is deducted
///
/// A commission larger than the organizer's share is a configuration error;
/// flooring at zero here would break the sum invariant downstream.
pub fn organizer_value_after_affiliate(
    schedule: &RateSchedule,
    base_amount: Decimal,
    affiliate_commission: Decimal,
) -> SplitResult<Decimal> {
    let organizer = organizer_value(schedule, base_amount);
    if affiliate_commission > organizer {
        return Err(SplitError::configuration(format!(
            "affiliate commission {} exceeds organizer share {}",
            affiliate_commission, organizer
        )));
    }
    Ok(organizer - affiliate_commission)
}

/// Compute every monetary quantity for one payment
///
/// Validates the schedule, the base amount and the commission spec, then
/// composes the individual calculations and re-checks the sum invariant as
/// a fail-closed defensive step.
pub fn compute_split(
    schedule: &RateSchedule,
    base_amount: Decimal,
    installments: u32,
    commission: Option<&CommissionSpec>,
) -> SplitResult<SplitComputation> {
    schedule.validate()?;
    require_amount(base_amount, "base amount")?;
    let base_amount = round_money(base_amount);

    let installment_fee = installment_fee(schedule, base_amount, installments)?;
    let platform_fee = platform_fee(schedule, base_amount);
    let final_amount = base_amount + installment_fee;
    let platform_amount = platform_fee + installment_fee;
    let affiliate_commission = match commission {
        Some(spec) => affiliate_value(base_amount, spec)?,
        None => Decimal::ZERO,
    };
    let organizer_amount =
        organizer_value_after_affiliate(schedule, base_amount, affiliate_commission)?;

    let computation = SplitComputation {
        base_amount,
        final_amount,
        platform_fee,
        installment_fee,
        affiliate_commission,
        organizer_amount,
        platform_amount,
    };
    computation.check_invariant()?;
    Ok(computation)
}
