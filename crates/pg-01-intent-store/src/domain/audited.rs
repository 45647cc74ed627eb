//! Audited storage strategy: contention-scaled latency plus audit writes.
//!
//! Each primary write pays a surcharge of `in-flight writers × per-writer
//! delay`, sampled at the moment the write begins (before its own guard is
//! taken, so a lone writer pays nothing). The strategy's callers follow
//! every primary write with an audit write; audit writes are tracked writes
//! with their own latency and surcharge, so they compound the very load
//! they measure. That compounding is what degrades latency super-linearly
//! under concurrency.
//!
//! The write set and ordering are identical to the fast strategy; only the
//! timing profile differs.

use super::audit::AuditLog;
use super::contention::ContentionTracker;
use super::errors::StoreError;
use super::records::RecordSpace;
use crate::ports::IntentStore;
use async_trait::async_trait;
use shared_types::{
    AuditKind, GatewayConfig, OneTimeCode, TransactionId, TransactionRecord, TransactionStatus,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, trace};

/// Contention-scaled store with an audit trail.
pub struct AuditedStore {
    config: GatewayConfig,
    tracker: Arc<ContentionTracker>,
    space: RecordSpace,
    audit_log: AuditLog,
}

impl AuditedStore {
    /// Creates a store sharing the given contention tracker.
    pub fn new(config: GatewayConfig, tracker: Arc<ContentionTracker>) -> Self {
        Self {
            config,
            tracker,
            space: RecordSpace::new(),
            audit_log: AuditLog::new(),
        }
    }

    /// Audit rows written so far (test observability).
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    /// Total cost of a write beginning now: its fixed latency plus the
    /// contention surcharge for every write currently in flight.
    fn write_delay(&self, fixed: Duration) -> Duration {
        let load = self.tracker.current_load();
        let surcharge = self.config.contention_delay_per_writer * load.min(u32::MAX as u64) as u32;
        trace!(load, ?surcharge, "sampled write contention");
        fixed + surcharge
    }
}

#[async_trait]
impl IntentStore for AuditedStore {
    async fn create_transaction(
        &self,
        masked_reference: String,
    ) -> Result<TransactionId, StoreError> {
        let delay = self.write_delay(self.config.base_write_latency);
        let _guard = self.tracker.acquire();
        sleep(delay).await;

        let record = TransactionRecord::new(masked_reference);
        let id = record.id;
        self.space.insert(record);
        debug!(%id, ?delay, "intent record created");
        Ok(id)
    }

    async fn mark_ready(&self, id: TransactionId) -> Result<(), StoreError> {
        let delay = self.write_delay(self.config.status_write_latency);
        let _guard = self.tracker.acquire();
        sleep(delay).await;

        self.space.set_status(id, TransactionStatus::AwaitingCode)?;
        debug!(%id, ?delay, "intent ready for code");
        Ok(())
    }

    async fn get_status(&self, id: TransactionId) -> Result<TransactionStatus, StoreError> {
        self.space.status(id)
    }

    async fn record_audit(&self, id: TransactionId, kind: AuditKind) -> Result<(), StoreError> {
        let delay = self.write_delay(self.config.audit_write_latency);
        let _guard = self.tracker.acquire();
        sleep(delay).await;

        // The audit row must reference an existing record.
        self.space.status(id)?;
        self.audit_log.append(id, kind);
        debug!(%id, kind = kind.as_str(), ?delay, "audit row written");
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
