//! In-memory record space shared by both storage strategies.
//!
//! Owns transaction records and their one-time codes. All status mutation
//! funnels through [`RecordSpace::set_status`], which enforces the monotonic
//! forward-only state machine and stamps `ready_at`/`completed_at` at the
//! moment the corresponding status lands.
//!
//! Locks are never held across an await point; strategies sleep out their
//! simulated latency first and only then take the lock to apply the
//! mutation, so readers observe a status strictly after its write has
//! "durably" completed.

use super::errors::StoreError;
use parking_lot::RwLock;
use shared_types::{unix_ms, OneTimeCode, TransactionId, TransactionRecord, TransactionStatus};
use std::collections::HashMap;

/// Map-backed storage for records and code sessions.
#[derive(Debug, Default)]
pub struct RecordSpace {
    records: RwLock<HashMap<TransactionId, TransactionRecord>>,
    codes: RwLock<HashMap<TransactionId, OneTimeCode>>,
}

impl RecordSpace {
    /// Creates an empty record space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly created record.
    pub fn insert(&self, record: TransactionRecord) {
        self.records.write().insert(record.id, record);
    }

    /// Current status of a record.
    pub fn status(&self, id: TransactionId) -> Result<TransactionStatus, StoreError> {
        self.records
            .read()
            .get(&id)
            .map(|r| r.status)
            .ok_or(StoreError::NotFound(id))
    }

    /// Clone of the full record.
    pub fn fetch(&self, id: TransactionId) -> Result<TransactionRecord, StoreError> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Moves a record to `next`, enforcing monotonic forward transitions.
    ///
    /// Stamps `ready_at` when the record becomes `AwaitingCode` and
    /// `completed_at` when it becomes `Completed`.
    pub fn set_status(
        &self,
        id: TransactionId,
        next: TransactionStatus,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if !record.status.can_transition_to(next) {
            return Err(StoreError::IllegalTransition {
                from: record.status,
                to: next,
            });
        }

        record.status = next;
        match next {
            TransactionStatus::AwaitingCode => record.ready_at = Some(unix_ms()),
            TransactionStatus::Completed => record.completed_at = Some(unix_ms()),
            _ => {}
        }
        Ok(())
    }

    /// Stores the one-time code for a transaction. At most one per
    /// transaction, ever.
    pub fn put_code(&self, code: OneTimeCode) -> Result<(), StoreError> {
        let mut codes = self.codes.write();
        if codes.contains_key(&code.transaction_id) {
            return Err(StoreError::CodeAlreadyIssued(code.transaction_id));
        }
        codes.insert(code.transaction_id, code);
        Ok(())
    }

    /// Clone of the code issued for a transaction.
    pub fn get_code(&self, id: TransactionId) -> Result<OneTimeCode, StoreError> {
        self.codes
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::CodeNotFound(id))
    }

    /// Marks the code consumed. First caller wins: returns `true` if this
    /// call consumed the code, `false` if it was already consumed.
    pub fn consume_code(&self, id: TransactionId) -> Result<bool, StoreError> {
        let mut codes = self.codes.write();
        let code = codes.get_mut(&id).ok_or(StoreError::CodeNotFound(id))?;
        if code.consumed {
            return Ok(false);
        }
        code.consumed = true;
        Ok(true)
    }
}
