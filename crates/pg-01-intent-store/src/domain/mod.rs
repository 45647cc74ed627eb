//! Domain layer of the intent store.

pub mod audit;
pub mod audited;
pub mod contention;
pub mod errors;
pub mod fast;
pub mod records;

pub use audit::{AuditEntry, AuditLog};
pub use audited::AuditedStore;
pub use contention::{ContentionTracker, WriteGuard};
pub use errors::StoreError;
pub use fast::FastStore;
pub use records::RecordSpace;
