//! Platform pricing configuration
//!
//! A [`RateSchedule`] is supplied externally (configuration row or file) and
//! validated once at the boundary; the calculator assumes a validated
//! schedule. A [`CommissionSpec`] describes an affiliate's cut of a single
//! ticket sale, either percentage-based or a fixed amount.

use crate::error::{SplitError, SplitResult};
use crate::money::{require_amount, require_percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform pricing configuration
///
/// `installment_rates` maps an installment count to the surcharge rate (in
/// percent) charged to the payer for spreading the payment. Entries are
/// cumulative tiers: a count between two entries uses the nearest lower
/// entry, and counts beyond the highest entry use the highest entry's rate.
/// One installment always carries no surcharge and needs no entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateSchedule {
    /// Administrative fee the platform retains from every sale, in percent
    pub admin_fee_percent: Decimal,
    /// Installment count -> surcharge rate in percent (counts >= 2)
    pub installment_rates: BTreeMap<u32, Decimal>,
}

impl RateSchedule {
    /// Validate rates at the configuration boundary
    pub fn validate(&self) -> SplitResult<()> {
        require_percent(self.admin_fee_percent, "admin_fee_percent")?;
        for (count, rate) in &self.installment_rates {
            if *count < 2 {
                return Err(SplitError::configuration(format!(
                    "installment rate entries start at 2 installments, got {}",
                    count
                )));
            }
            require_percent(*rate, &format!("installment rate for {} installments", count))?;
        }
        Ok(())
    }

    /// Surcharge rate (in percent) for a given installment count
    ///
    /// Returns zero for a single installment. Counts beyond the highest
    /// defined entry use the highest entry's rate; a count with no entry at
    /// or below it is a configuration error.
    pub fn surcharge_rate(&self, installments: u32) -> SplitResult<Decimal> {
        if installments == 0 {
            return Err(SplitError::configuration(
                "installments must be at least 1, got 0",
            ));
        }
        if installments == 1 {
            return Ok(Decimal::ZERO);
        }
        self.installment_rates
            .range(..=installments)
            .next_back()
            .map(|(_, rate)| *rate)
            .ok_or_else(|| {
                SplitError::configuration(format!(
                    "rate schedule has no surcharge rate for {} installments",
                    installments
                ))
            })
    }
}

/// Affiliate commission definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionSpec {
    /// Percentage of the base ticket price, in [0, 100]
    Percentage(Decimal),
    /// Fixed amount, at most the base ticket price
    Fixed(Decimal),
}

impl CommissionSpec {
    /// Validate the spec against the base price it will apply to.
    /// Out-of-range values are rejected, never clamped.
    pub fn validate_against(&self, base_amount: Decimal) -> SplitResult<()> {
        match self {
            Self::Percentage(value) => require_percent(*value, "commission percentage"),
            Self::Fixed(value) => {
                require_amount(*value, "fixed commission")?;
                if *value > base_amount {
                    return Err(SplitError::configuration(format!(
                        "fixed commission {} exceeds base price {}",
                        value, base_amount
                    )));
                }
                Ok(())
            }
        }
    }
}
