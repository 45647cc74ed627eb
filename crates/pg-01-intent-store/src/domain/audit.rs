//! Append-only audit trail for the audited storage strategy.
//!
//! Audit rows exist purely so the audited strategy has a second, tracked
//! write to perform per primary write; nothing in the gateway reads them on
//! any decision path. Tests use them to assert write ordering.

use parking_lot::RwLock;
use shared_types::{unix_ms, AuditKind, Timestamp, TransactionId};

/// One audit row.
#[derive(Clone, Debug)]
pub struct AuditEntry {
    /// Monotonic sequence number within this log.
    pub seq: u64,
    /// Transaction the row belongs to.
    pub transaction_id: TransactionId,
    /// What happened.
    pub kind: AuditKind,
    /// When the row was appended (ms).
    pub at: Timestamp,
}

/// Append-only in-memory audit log.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row and returns its sequence number.
    pub fn append(&self, transaction_id: TransactionId, kind: AuditKind) -> u64 {
        let mut entries = self.entries.write();
        let seq = entries.len() as u64;
        entries.push(AuditEntry {
            seq,
            transaction_id,
            kind,
            at: unix_ms(),
        });
        seq
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no rows have been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Rows for one transaction, in append order.
    pub fn for_transaction(&self, id: TransactionId) -> Vec<AuditEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.transaction_id == id)
            .cloned()
            .collect()
    }
}
