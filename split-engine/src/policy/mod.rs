//! Split authorization policy
//!
//! Decides whether a beneficiary split may be submitted to the payment
//! gateway, and builds the beneficiary list from a payment record's
//! persisted amounts (never from a fresh computation — what was charged is
//! the source of truth for what is split).
//!
//! Per record the lifecycle is `NOT_ELIGIBLE -> ELIGIBLE -> SPLIT_CREATED`:
//! settlement of the gateway charge makes a record eligible, and the
//! `split_created` flag marks the terminal state. The flag is a best-effort
//! at-most-once guard: the check and the later write are separate store
//! calls, so a concurrent caller that loses the race must see the flag and
//! back off. A store with an atomic conditional write can close the window
//! without changing this interface.

use rust_decimal::Decimal;
use shared::error::{SplitError, SplitResult};
use shared::models::{Beneficiary, ChargeStatus, PaymentRecord};

/// Gateway recipient identifiers resolved by the caller
#[derive(Debug, Clone)]
pub struct BeneficiaryIds {
    pub organizer: String,
    pub platform: String,
    /// Affiliate payout destination, when the affiliate has one registered
    pub affiliate: Option<String>,
}

/// Why a split attempt is a no-op (expected outcomes, not errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// The gateway has not reported the charge as settled yet
    ChargeNotSettled,
    /// The split was already created for this record
    AlreadyCreated,
    /// Every computed amount is zero; there is nothing to route
    NothingToSplit,
}

/// Outcome of a split authorization check
#[derive(Debug, Clone, PartialEq)]
pub enum SplitDecision {
    /// Split may be submitted with these beneficiaries
    Ready(Vec<Beneficiary>),
    /// Expected no-op; try again later or never
    NotApplicable(NotApplicableReason),
}

/// Decide whether a split may be created for `record`, and with what
/// beneficiary list.
///
/// Eligibility misses return [`SplitDecision::NotApplicable`] rather than an
/// error. Real failures (unroutable commission, unbalanced list) abort the
/// attempt; a partial split is never authorized.
pub fn authorize_split(
    record: &PaymentRecord,
    charge_status: ChargeStatus,
    ids: &BeneficiaryIds,
) -> SplitResult<SplitDecision> {
    if !charge_status.is_settled() {
        tracing::debug!(
            payment_id = %record.id,
            status = ?charge_status,
            "Charge not settled, split not applicable"
        );
        return Ok(SplitDecision::NotApplicable(
            NotApplicableReason::ChargeNotSettled,
        ));
    }

    if record.split_created {
        tracing::debug!(payment_id = %record.id, "Split already created, skipping");
        return Ok(SplitDecision::NotApplicable(NotApplicableReason::AlreadyCreated));
    }

    let beneficiaries = build_beneficiaries(record, ids)?;
    if beneficiaries.is_empty() {
        tracing::debug!(payment_id = %record.id, "No nonzero beneficiary, nothing to split");
        return Ok(SplitDecision::NotApplicable(NotApplicableReason::NothingToSplit));
    }

    Ok(SplitDecision::Ready(beneficiaries))
}

/// Build the beneficiary list from the record's persisted amounts
///
/// Zero-amount beneficiaries are omitted. An owed affiliate commission with
/// no payout destination fails the whole attempt: dropping the affiliate
/// while keeping the charged total would submit an unbalanced split.
pub fn build_beneficiaries(
    record: &PaymentRecord,
    ids: &BeneficiaryIds,
) -> SplitResult<Vec<Beneficiary>> {
    let mut beneficiaries = Vec::with_capacity(3);

    if record.platform_amount > Decimal::ZERO {
        beneficiaries.push(Beneficiary::fixed(&ids.platform, record.platform_amount));
    }

    if record.affiliate_commission > Decimal::ZERO {
        match &ids.affiliate {
            Some(affiliate_id) => {
                beneficiaries.push(Beneficiary::fixed(affiliate_id, record.affiliate_commission));
            }
            None => {
                let affiliate_id = record
                    .affiliate_id
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::error!(
                    payment_id = %record.id,
                    affiliate_id = %affiliate_id,
                    amount = %record.affiliate_commission,
                    "Affiliate commission owed but no payout destination configured"
                );
                return Err(SplitError::UnresolvedBeneficiary {
                    affiliate_id,
                    amount: record.affiliate_commission,
                });
            }
        }
    }

    if record.organizer_amount > Decimal::ZERO {
        beneficiaries.push(Beneficiary::fixed(&ids.organizer, record.organizer_amount));
    }

    // The list must account for the full charged amount
    let total: Decimal = beneficiaries.iter().map(|b| b.amount).sum();
    if total != record.final_amount {
        return Err(SplitError::InvariantViolation {
            expected: record.final_amount,
            actual: total,
        });
    }

    Ok(beneficiaries)
}
