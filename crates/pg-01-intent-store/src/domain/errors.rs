//! Intent store error types.
//!
//! Every variant here represents a broken expectation about the record
//! space. Whether that is fatal depends on the caller: an id the
//! orchestrator created itself going missing is an invariant violation,
//! while an unknown caller-supplied id is an ordinary rejection.

use shared_types::{TransactionId, TransactionStatus};

/// Intent store error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No transaction record exists for the id.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// No one-time code has been issued for the transaction.
    #[error("no code issued for transaction: {0}")]
    CodeNotFound(TransactionId),

    /// A code was already issued for the transaction; codes are never
    /// regenerated.
    #[error("code already issued for transaction: {0}")]
    CodeAlreadyIssued(TransactionId),

    /// Attempted status move that is not a legal forward transition.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        /// Status the record was in.
        from: TransactionStatus,
        /// Status the caller asked for.
        to: TransactionStatus,
    },
}
