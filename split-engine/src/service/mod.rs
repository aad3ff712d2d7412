//! Orchestration around the fee calculator and split policy
//!
//! [`SplitService`] is what request handlers call: it validates input,
//! computes the amounts once at order creation, persists them, and later
//! (webhook path) authorizes and submits the funds split. All coordination
//! between concurrent callers goes through the persisted `split_created`
//! flag; see the policy module for the guard's semantics.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{SplitError, SplitResult};
use shared::models::{ChargeStatus, CommissionSpec, PaymentRecord, PaymentStatus, RateSchedule};
use uuid::Uuid;

use crate::fees;
use crate::gateway::{CreateOrderRequest, CreateSplitRequest, GatewayClient, PaymentMethod};
use crate::policy::{self, BeneficiaryIds, NotApplicableReason, SplitDecision};
use crate::store::PaymentStore;

/// Input for creating an order with the gateway
#[derive(Debug, Clone)]
pub struct OrderInput {
    /// Record id; generated when absent
    pub payment_id: Option<String>,
    pub base_amount: Decimal,
    pub installments: u32,
    pub payment_method: PaymentMethod,
    /// Affiliate attributed to the sale, with its commission definition
    pub affiliate_id: Option<String>,
    pub commission: Option<CommissionSpec>,
}

/// Outcome of a split-creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The split was submitted to the gateway and the record updated
    Created,
    /// Expected no-op (not settled yet, already created, nothing to route)
    Skipped(NotApplicableReason),
}

/// Service tying the calculator and policy to the collaborator seams
pub struct SplitService<S, G> {
    store: S,
    gateway: G,
    schedule: RateSchedule,
}

impl<S: PaymentStore, G: GatewayClient> SplitService<S, G> {
    pub fn new(store: S, gateway: G, schedule: RateSchedule) -> SplitResult<Self> {
        schedule.validate()?;
        Ok(Self {
            store,
            gateway,
            schedule,
        })
    }

    /// Create an order with the gateway and persist the computed amounts
    ///
    /// Fails closed: a configuration error (bad rates, oversized commission)
    /// aborts before anything is written or sent to the gateway.
    pub async fn create_order(&self, input: OrderInput) -> SplitResult<PaymentRecord> {
        let amounts = fees::compute_split(
            &self.schedule,
            input.base_amount,
            input.installments,
            input.commission.as_ref(),
        )?;

        let order = self
            .gateway
            .create_order(&CreateOrderRequest {
                amount: amounts.final_amount,
                payment_method: input.payment_method,
                installments: input.installments,
            })
            .await?;

        let payment_id = input
            .payment_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut record = PaymentRecord::new(payment_id, input.installments, &amounts);
        record.charge_id = Some(order.charge_id.clone());
        record.affiliate_id = input.affiliate_id;
        self.store.write_payment(&record).await?;

        tracing::info!(
            payment_id = %record.id,
            charge_id = %order.charge_id,
            final_amount = %record.final_amount,
            installments = record.installments,
            "Order created with gateway"
        );
        Ok(record)
    }

    /// Webhook path: record that the gateway reported the charge settled
    pub async fn mark_paid(
        &self,
        payment_id: &str,
        charge_status: ChargeStatus,
    ) -> SplitResult<PaymentRecord> {
        let mut record = self.read_required(payment_id).await?;
        if charge_status.is_settled() && record.payment_status == PaymentStatus::Pending {
            record.payment_status = PaymentStatus::Paid;
            self.store.write_payment(&record).await?;
            tracing::info!(payment_id = %record.id, "Payment marked as paid");
        }
        Ok(record)
    }

    /// Authorize and submit the funds split for a settled payment
    ///
    /// A second caller racing this one sees the `split_created` flag and
    /// gets `Skipped(AlreadyCreated)` instead of submitting a duplicate.
    pub async fn create_split(
        &self,
        payment_id: &str,
        ids: &BeneficiaryIds,
    ) -> SplitResult<SplitOutcome> {
        let mut record = self.read_required(payment_id).await?;

        let Some(charge_id) = record.charge_id.clone() else {
            tracing::debug!(payment_id = %record.id, "No gateway charge yet, split not applicable");
            return Ok(SplitOutcome::Skipped(NotApplicableReason::ChargeNotSettled));
        };
        let charge_status = self.gateway.charge_status(&charge_id).await?;

        let beneficiaries = match policy::authorize_split(&record, charge_status, ids)? {
            SplitDecision::Ready(beneficiaries) => beneficiaries,
            SplitDecision::NotApplicable(reason) => return Ok(SplitOutcome::Skipped(reason)),
        };

        self.gateway
            .create_split(&CreateSplitRequest {
                charge_id: charge_id.clone(),
                beneficiaries,
            })
            .await?;

        record.split_created = true;
        record.split_created_at = Some(Utc::now());
        if record.payment_status == PaymentStatus::Pending {
            record.payment_status = PaymentStatus::Paid;
        }
        self.store.write_payment(&record).await?;

        tracing::info!(
            payment_id = %record.id,
            charge_id = %charge_id,
            final_amount = %record.final_amount,
            "Split created"
        );
        Ok(SplitOutcome::Created)
    }

    async fn read_required(&self, payment_id: &str) -> SplitResult<PaymentRecord> {
        self.store
            .read_payment(payment_id)
            .await?
            .ok_or_else(|| SplitError::Store(format!("payment {} not found", payment_id)))
    }
}

#[cfg(test)]
mod tests;
