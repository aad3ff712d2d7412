use super::*;
use crate::gateway::GatewayOrder;
use crate::store::MemoryPaymentStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn schedule() -> RateSchedule {
    RateSchedule {
        admin_fee_percent: dec("10"),
        installment_rates: BTreeMap::from([(2, dec("3")), (3, dec("5")), (6, dec("8"))]),
    }
}

fn ids() -> BeneficiaryIds {
    BeneficiaryIds {
        organizer: "rcpt_organizer".to_string(),
        platform: "rcpt_platform".to_string(),
        affiliate: Some("rcpt_affiliate".to_string()),
    }
}

/// Scripted gateway double: fixed charge id, settable charge status,
/// captured split requests.
#[derive(Default)]
struct MockGateway {
    status: Mutex<Option<ChargeStatus>>,
    orders_created: AtomicUsize,
    split_requests: Mutex<Vec<CreateSplitRequest>>,
}

impl MockGateway {
    fn settle(&self) {
        *self.status.lock().unwrap() = Some(ChargeStatus::Paid);
    }

    fn split_requests(&self) -> Vec<CreateSplitRequest> {
        self.split_requests.lock().unwrap().clone()
    }

    fn orders_created(&self) -> usize {
        self.orders_created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GatewayClient for MockGateway {
    async fn create_order(&self, request: &CreateOrderRequest) -> SplitResult<GatewayOrder> {
        assert!(request.amount >= Decimal::ZERO);
        self.orders_created.fetch_add(1, Ordering::SeqCst);
        *self.status.lock().unwrap() = Some(ChargeStatus::Processing);
        Ok(GatewayOrder {
            charge_id: "ch_1".to_string(),
            status: ChargeStatus::Processing,
        })
    }

    async fn create_split(&self, request: &CreateSplitRequest) -> SplitResult<()> {
        self.split_requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn charge_status(&self, charge_id: &str) -> SplitResult<ChargeStatus> {
        assert_eq!(charge_id, "ch_1");
        Ok(self.status.lock().unwrap().unwrap_or(ChargeStatus::Processing))
    }
}

fn service() -> (SplitService<Arc<MemoryPaymentStore>, Arc<MockGateway>>, Arc<MemoryPaymentStore>, Arc<MockGateway>) {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(MockGateway::default());
    let service = SplitService::new(store.clone(), gateway.clone(), schedule()).unwrap();
    (service, store, gateway)
}

fn order_input(base: &str, installments: u32) -> OrderInput {
    OrderInput {
        payment_id: Some("pay_1".to_string()),
        base_amount: dec(base),
        installments,
        payment_method: PaymentMethod::CreditCard,
        affiliate_id: None,
        commission: None,
    }
}

#[tokio::test]
async fn test_create_order_persists_computed_amounts() {
    let (service, store, _gateway) = service();

    let record = service.create_order(order_input("200.00", 3)).await.unwrap();
    assert_eq!(record.final_amount, dec("210.00"));
    assert_eq!(record.installment_fee, dec("10.00"));
    assert_eq!(record.platform_amount, dec("30.00"));
    assert_eq!(record.organizer_amount, dec("180.00"));
    assert_eq!(record.charge_id.as_deref(), Some("ch_1"));
    assert_eq!(record.payment_status, PaymentStatus::Pending);

    let stored = store.read_payment("pay_1").await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn test_create_order_generates_id_when_absent() {
    let (service, _store, _gateway) = service();
    let mut input = order_input("100.00", 1);
    input.payment_id = None;
    let record = service.create_order(input).await.unwrap();
    assert!(!record.id.is_empty());
}

#[tokio::test]
async fn test_configuration_error_writes_nothing() {
    let (service, store, gateway) = service();

    // Fixed commission above the base price: rejected before any I/O
    let mut input = order_input("50.00", 1);
    input.affiliate_id = Some("aff_1".to_string());
    input.commission = Some(CommissionSpec::Fixed(dec("60.00")));

    let err = service.create_order(input).await.unwrap_err();
    assert!(err.is_configuration());
    assert!(store.is_empty());
    assert_eq!(gateway.orders_created(), 0);
}

#[tokio::test]
async fn test_split_before_settlement_is_skipped() {
    let (service, store, gateway) = service();
    service.create_order(order_input("100.00", 1)).await.unwrap();

    let outcome = service.create_split("pay_1", &ids()).await.unwrap();
    assert_eq!(
        outcome,
        SplitOutcome::Skipped(NotApplicableReason::ChargeNotSettled)
    );
    assert!(gateway.split_requests().is_empty());
    let record = store.read_payment("pay_1").await.unwrap().unwrap();
    assert!(!record.split_created);
}

#[tokio::test]
async fn test_split_after_settlement_then_idempotent() {
    let (service, store, gateway) = service();
    let mut input = order_input("150.00", 1);
    input.affiliate_id = Some("aff_1".to_string());
    input.commission = Some(CommissionSpec::Percentage(dec("10")));
    service.create_order(input).await.unwrap();

    gateway.settle();
    let outcome = service.create_split("pay_1", &ids()).await.unwrap();
    assert_eq!(outcome, SplitOutcome::Created);

    let requests = gateway.split_requests();
    assert_eq!(requests.len(), 1);
    let total: Decimal = requests[0].beneficiaries.iter().map(|b| b.amount).sum();
    assert_eq!(total, dec("150.00"));

    let record = store.read_payment("pay_1").await.unwrap().unwrap();
    assert!(record.split_created);
    assert!(record.split_created_at.is_some());
    assert_eq!(record.payment_status, PaymentStatus::Paid);

    // Second attempt backs off without touching the gateway again
    let outcome = service.create_split("pay_1", &ids()).await.unwrap();
    assert_eq!(
        outcome,
        SplitOutcome::Skipped(NotApplicableReason::AlreadyCreated)
    );
    assert_eq!(gateway.split_requests().len(), 1);
}

#[tokio::test]
async fn test_unresolved_affiliate_aborts_split() {
    let (service, store, gateway) = service();
    let mut input = order_input("150.00", 1);
    input.affiliate_id = Some("aff_1".to_string());
    input.commission = Some(CommissionSpec::Percentage(dec("10")));
    service.create_order(input).await.unwrap();
    gateway.settle();

    let mut ids = ids();
    ids.affiliate = None;
    let err = service.create_split("pay_1", &ids).await.unwrap_err();
    assert!(matches!(err, SplitError::UnresolvedBeneficiary { .. }));

    // Fail closed: no split submitted, flag untouched
    assert!(gateway.split_requests().is_empty());
    let record = store.read_payment("pay_1").await.unwrap().unwrap();
    assert!(!record.split_created);
}

#[tokio::test]
async fn test_mark_paid_transitions_pending_to_paid() {
    let (service, store, _gateway) = service();
    service.create_order(order_input("100.00", 1)).await.unwrap();

    let record = service.mark_paid("pay_1", ChargeStatus::Paid).await.unwrap();
    assert_eq!(record.payment_status, PaymentStatus::Paid);
    let stored = store.read_payment("pay_1").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Paid);

    // Unsettled statuses leave the record alone
    let record = service
        .mark_paid("pay_1", ChargeStatus::Processing)
        .await
        .unwrap();
    assert_eq!(record.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_missing_payment_is_a_store_error() {
    let (service, _store, _gateway) = service();
    let err = service.create_split("pay_missing", &ids()).await.unwrap_err();
    assert!(matches!(err, SplitError::Store(_)));
}

#[tokio::test]
async fn test_invalid_schedule_rejected_at_construction() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(MockGateway::default());
    let bad = RateSchedule {
        admin_fee_percent: dec("120"),
        installment_rates: BTreeMap::new(),
    };
    assert!(SplitService::new(store, gateway, bad).is_err());
}
