//! # Inbound Port - IntentStore
//!
//! Capability trait over the simulated transaction database. The
//! orchestrator and code generator depend only on this trait; the fast and
//! audited strategies are drop-in substitutable behind it.

use crate::domain::StoreError;
use async_trait::async_trait;
use shared_types::{AuditKind, OneTimeCode, TransactionId, TransactionRecord, TransactionStatus};

/// Storage capability interface.
///
/// Write operations (`create_transaction`, `mark_ready`, `record_audit`)
/// suspend for their simulated latency and register with the contention
/// tracker for their duration. Reads and code-session operations return
/// immediately: the race under demonstration is about the intent write
/// path, not the verification path.
#[async_trait]
pub trait IntentStore: Send + Sync {
    /// Writes a fresh record in the `Created` state and returns its id.
    async fn create_transaction(&self, masked_reference: String)
        -> Result<TransactionId, StoreError>;

    /// Second write: moves the record to `AwaitingCode`.
    ///
    /// Readers never observe `AwaitingCode` before this write's latency has
    /// fully elapsed.
    async fn mark_ready(&self, id: TransactionId) -> Result<(), StoreError>;

    /// Current status of a record. No simulated latency.
    async fn get_status(&self, id: TransactionId) -> Result<TransactionStatus, StoreError>;

    /// Writes an audit row for the transaction.
    ///
    /// A tracked, latency-bearing write under the audited strategy; a no-op
    /// under the fast strategy (the operation is conceptually absent there).
    async fn record_audit(&self, id: TransactionId, kind: AuditKind) -> Result<(), StoreError>;

    /// Clone of the full record.
    async fn fetch(&self, id: TransactionId) -> Result<TransactionRecord, StoreError>;

    /// Orchestrator-driven status move (fail / verify / complete),
    /// enforcing the monotonic state machine. No simulated latency.
    async fn transition(
        &self,
        id: TransactionId,
        next: TransactionStatus,
    ) -> Result<(), StoreError>;

    /// Stores the one-time code for a transaction. At most one, ever.
    async fn put_code(&self, code: OneTimeCode) -> Result<(), StoreError>;

    /// Clone of the code issued for a transaction.
    async fn get_code(&self, id: TransactionId) -> Result<OneTimeCode, StoreError>;

    /// Consumes the code. Returns `true` if this call consumed it, `false`
    /// if it was already consumed.
    async fn consume_code(&self, id: TransactionId) -> Result<bool, StoreError>;
}
