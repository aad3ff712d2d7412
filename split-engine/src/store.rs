//! Persistence collaborator seam
//!
//! The engine never issues its own queries: it reads a [`PaymentRecord`],
//! decides, and writes updated fields back through this trait. The hosted
//! backend's record store sits behind an implementation of it in the
//! application layer.

use async_trait::async_trait;
use shared::error::{SplitError, SplitResult};
use shared::models::PaymentRecord;
use std::collections::HashMap;
use std::sync::Mutex;

/// Record store for payment records
///
/// `write_payment` persists the whole record. Implementations backed by a
/// store with conditional writes should reject a write whose `split_created`
/// flag races a concurrent one (compare-and-set) and surface that as a
/// [`SplitError::Store`]; the in-memory double below is last-write-wins,
/// matching the observed hosted backend.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn read_payment(&self, id: &str) -> SplitResult<Option<PaymentRecord>>;
    async fn write_payment(&self, record: &PaymentRecord) -> SplitResult<()>;
}

#[async_trait]
impl<T: PaymentStore + ?Sized> PaymentStore for std::sync::Arc<T> {
    async fn read_payment(&self, id: &str) -> SplitResult<Option<PaymentRecord>> {
        (**self).read_payment(id).await
    }

    async fn write_payment(&self, record: &PaymentRecord) -> SplitResult<()> {
        (**self).write_payment(record).await
    }
}

/// In-memory store, for tests and local development
#[derive(Default)]
pub struct MemoryPaymentStore {
    records: Mutex<HashMap<String, PaymentRecord>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn read_payment(&self, id: &str) -> SplitResult<Option<PaymentRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| SplitError::Store("payment store lock poisoned".to_string()))?;
        Ok(records.get(id).cloned())
    }

    async fn write_payment(&self, record: &PaymentRecord) -> SplitResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SplitError::Store("payment store lock poisoned".to_string()))?;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }
}
