//! Payment record and split value types

use crate::error::{SplitError, SplitResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment lifecycle status as persisted on the record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    PendingRefund,
}

/// Charge status as reported by the payment gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    Success,
    Paid,
    Processing,
    Failed,
    Refunded,
}

impl ChargeStatus {
    /// True once the underlying charge has settled and funds may be split
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Paid)
    }
}

/// Split mode accepted by the payment gateway (fixed amounts only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitKind {
    #[default]
    Fixed,
}

/// A named recipient of a fixed monetary amount within one payment split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Beneficiary {
    /// Gateway recipient identifier
    pub id: String,
    /// Amount in currency unit
    pub amount: Decimal,
    pub kind: SplitKind,
}

impl Beneficiary {
    pub fn fixed(id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            amount,
            kind: SplitKind::Fixed,
        }
    }
}

/// Result of a single fee calculation
///
/// Produced once at order-creation time and persisted onto the
/// [`PaymentRecord`]; the split step reads the persisted fields rather than
/// re-deriving them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SplitComputation {
    /// Base ticket price
    pub base_amount: Decimal,
    /// Amount actually charged to the payer (base + installment surcharge)
    pub final_amount: Decimal,
    /// Administrative fee retained by the platform
    pub platform_fee: Decimal,
    /// Installment surcharge (accrues to the platform)
    pub installment_fee: Decimal,
    /// Affiliate commission (zero when no affiliate)
    pub affiliate_commission: Decimal,
    /// Organizer payout after platform fee and affiliate commission
    pub organizer_amount: Decimal,
    /// Platform's total take (admin fee + installment surcharge)
    pub platform_amount: Decimal,
}

impl SplitComputation {
    /// Verify the primary correctness property: the parts sum to the whole.
    /// Unreachable when input validation passes; kept as a fail-closed check.
    pub fn check_invariant(&self) -> SplitResult<()> {
        let actual = self.organizer_amount + self.platform_amount + self.affiliate_commission;
        if actual != self.final_amount {
            return Err(SplitError::InvariantViolation {
                expected: self.final_amount,
                actual,
            });
        }
        Ok(())
    }
}

/// Persisted payment record
///
/// The amount fields are written once when the order is created with the
/// gateway and are the source of truth for the later split step. The charge
/// may settle asynchronously (webhook) long after the computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: String,
    /// Gateway charge identifier, set once the order exists at the gateway
    pub charge_id: Option<String>,
    pub payment_status: PaymentStatus,
    /// At-most-once guard for split creation
    pub split_created: bool,
    pub installments: u32,
    /// Affiliate attributed to this sale, if any
    pub affiliate_id: Option<String>,
    pub base_amount: Decimal,
    pub final_amount: Decimal,
    pub platform_fee: Decimal,
    pub installment_fee: Decimal,
    pub affiliate_commission: Decimal,
    pub organizer_amount: Decimal,
    pub platform_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub split_created_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// Create a pending record carrying a computation's amounts
    pub fn new(id: impl Into<String>, installments: u32, amounts: &SplitComputation) -> Self {
        Self {
            id: id.into(),
            charge_id: None,
            payment_status: PaymentStatus::Pending,
            split_created: false,
            installments,
            affiliate_id: None,
            base_amount: amounts.base_amount,
            final_amount: amounts.final_amount,
            platform_fee: amounts.platform_fee,
            installment_fee: amounts.installment_fee,
            affiliate_commission: amounts.affiliate_commission,
            organizer_amount: amounts.organizer_amount,
            platform_amount: amounts.platform_amount,
            created_at: Utc::now(),
            split_created_at: None,
        }
    }

    /// The persisted amounts, as a computation value
    pub fn amounts(&self) -> SplitComputation {
        SplitComputation {
            base_amount: self.base_amount,
            final_amount: self.final_amount,
            platform_fee: self.platform_fee,
            installment_fee: self.installment_fee,
            affiliate_commission: self.affiliate_commission,
            organizer_amount: self.organizer_amount,
            platform_amount: self.platform_amount,
        }
    }
}
