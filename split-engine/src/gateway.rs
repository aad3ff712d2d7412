//! Payment gateway collaborator seam
//!
//! The gateway owns the actual funds movement; this engine only produces the
//! inputs for its calls. Request and response shapes mirror the gateway's
//! REST contract (create order, create split, get charge), the same way the
//! platform talks to its billing provider elsewhere: plain DTOs, no SDK.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::SplitResult;
use shared::models::{Beneficiary, ChargeStatus};

/// Payment method accepted at order creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Pix,
    Boleto,
}

/// Order-creation request sent to the gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    /// Amount actually charged to the payer (the computed final value)
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub installments: u32,
}

/// Charge handle returned by the gateway at order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayOrder {
    pub charge_id: String,
    pub status: ChargeStatus,
}

/// Split-creation request sent to the gateway after settlement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSplitRequest {
    pub charge_id: String,
    pub beneficiaries: Vec<Beneficiary>,
}

/// Gateway client seam; the application layer provides the HTTP-backed
/// implementation.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> SplitResult<GatewayOrder>;
    async fn create_split(&self, request: &CreateSplitRequest) -> SplitResult<()>;
    async fn charge_status(&self, charge_id: &str) -> SplitResult<ChargeStatus>;
}

#[async_trait]
impl<T: GatewayClient + ?Sized> GatewayClient for std::sync::Arc<T> {
    async fn create_order(&self, request: &CreateOrderRequest) -> SplitResult<GatewayOrder> {
        (**self).create_order(request).await
    }

    async fn create_split(&self, request: &CreateSplitRequest) -> SplitResult<()> {
        (**self).create_split(request).await
    }

    async fn charge_status(&self, charge_id: &str) -> SplitResult<ChargeStatus> {
        (**self).charge_status(charge_id).await
    }
}
