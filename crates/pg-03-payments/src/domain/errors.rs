//! The orchestrator's single fatal error class.

use pg_01_intent_store::StoreError;

/// Fatal orchestrator errors.
///
/// Deliberately narrow: timeouts, declines, expired or mismatched codes are
/// all payload-level outcomes, not errors. Only a broken store invariant
/// (missing record mid-flow, illegal transition, duplicate code) escalates.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Record-space invariant violation inside the storage layer.
    #[error("storage fault: {0}")]
    Storage(#[from] StoreError),
}
