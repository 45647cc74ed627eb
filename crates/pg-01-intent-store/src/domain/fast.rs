//! Fast storage strategy: fixed base latency, no contention scaling.
//!
//! Every write costs `base_write_latency`, simulating real I/O, and still
//! registers with the contention tracker for its duration, but the delay
//! never scales with load, so concurrency leaves the timing contract
//! intact. Audit writes do not exist in this strategy.

use super::contention::ContentionTracker;
use super::errors::StoreError;
use super::records::RecordSpace;
use crate::ports::IntentStore;
use async_trait::async_trait;
use shared_types::{
    AuditKind, GatewayConfig, OneTimeCode, TransactionId, TransactionRecord, TransactionStatus,
};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::debug;

/// Fixed-latency store.
pub struct FastStore {
    config: GatewayConfig,
    tracker: Arc<ContentionTracker>,
    space: RecordSpace,
}

impl FastStore {
    /// Creates a store sharing the given contention tracker.
    pub fn new(config: GatewayConfig, tracker: Arc<ContentionTracker>) -> Self {
        Self {
            config,
            tracker,
            space: RecordSpace::new(),
        }
    }
}

#[async_trait]
impl IntentStore for FastStore {
    async fn create_transaction(
        &self,
        masked_reference: String,
    ) -> Result<TransactionId, StoreError> {
        let _guard = self.tracker.acquire();
        sleep(self.config.base_write_latency).await;

        let record = TransactionRecord::new(masked_reference);
        let id = record.id;
        self.space.insert(record);
        debug!(%id, "intent record created");
        Ok(id)
    }

    async fn mark_ready(&self, id: TransactionId) -> Result<(), StoreError> {
        let _guard = self.tracker.acquire();
        sleep(self.config.base_write_latency).await;

        self.space.set_status(id, TransactionStatus::AwaitingCode)?;
        debug!(%id, "intent ready for code");
        Ok(())
    }

    async fn get_status(&self, id: TransactionId) -> Result<TransactionStatus, StoreError> {
        self.space.status(id)
    }

    async fn record_audit(&self, _id: TransactionId, _kind: AuditKind) -> Result<(), StoreError> {
        // No audit trail in this strategy.
        Ok(())
    }

    async fn fetch(&self, id: TransactionId) -> Result<TransactionRecord, StoreError> {
        self.space.fetch(id)
    }

    async fn transition(
        &self,
        id: TransactionId,
        next: TransactionStatus,
    ) -> Result<(), StoreError> {
        self.space.set_status(id, next)
    }

    async fn put_code(&self, code: OneTimeCode) -> Result<(), StoreError> {
        self.space.put_code(code)
    }

    async fn get_code(&self, id: TransactionId) -> Result<OneTimeCode, StoreError> {
        self.space.get_code(id)
    }

    async fn consume_code(&self, id: TransactionId) -> Result<bool, StoreError> {
        self.space.consume_code(id)
    }
}
