//! # Intent Store Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! In-memory timing simulator standing in for the gateway's transaction
//! database. It owns the record space for payment intents and their one-time
//! codes, and injects configurable write latency so the timing contract
//! between payment creation and code generation can be exercised under load.
//! It is a simulator, not a durable store: no persistence, no recovery.
//!
//! ## Strategies
//!
//! Two interchangeable implementations serve the same [`ports::IntentStore`]
//! port and are selected at construction time via [`build_store`]:
//!
//! | Strategy | Write cost | Audit rows |
//! |----------|-----------|------------|
//! | [`FastStore`](domain::FastStore) | fixed base latency | none |
//! | [`AuditedStore`](domain::AuditedStore) | base + contention surcharge | one per primary write |
//!
//! Both perform the same writes in the same order; only timing differs, so
//! the orchestrator's logic is identical regardless of which is active.
//!
//! ## Contention model
//!
//! Every latency-bearing write brackets itself with a
//! [`WriteGuard`](domain::WriteGuard) from the shared
//! [`ContentionTracker`](domain::ContentionTracker). Under the audited
//! strategy each write also pays `in-flight writers × per-writer delay`,
//! sampled as the write begins. Audit writes are tracked writes themselves,
//! so they compound the very load they measure. That feedback is the
//! mechanism by which concurrency degrades latency super-linearly.
//!
//! ## Module Structure
//!
//! ```text
//! ports/inbound.rs  - IntentStore capability trait
//! domain/contention - atomic in-flight write counter + scoped guard
//! domain/records    - record space shared by both strategies
//! domain/audit      - append-only audit trail (audited strategy)
//! domain/fast       - fixed-latency strategy
//! domain/audited    - contention-scaled strategy
//! ```

pub mod domain;
pub mod ports;

pub use domain::{AuditedStore, ContentionTracker, FastStore, StoreError, WriteGuard};
pub use ports::IntentStore;

use shared_types::{GatewayConfig, StorageStrategy};
use std::sync::Arc;

/// Constructs the configured storage strategy behind the common port.
///
/// The choice is a deployment-time decision; nothing in the caller-facing
/// contract changes between strategies.
pub fn build_store(
    config: &GatewayConfig,
    tracker: Arc<ContentionTracker>,
) -> Arc<dyn IntentStore> {
    match config.strategy {
        StorageStrategy::Fast => Arc::new(FastStore::new(config.clone(), tracker)),
        StorageStrategy::Audited => Arc::new(AuditedStore::new(config.clone(), tracker)),
    }
}
