//! # One-Time-Code Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Produces the bounded-lifetime one-time code for a payment transaction.
//! The generator polls the intent store until the transaction reports
//! readiness, bounded by an absolute deadline. Missing the deadline is an
//! ordinary outcome returned by value, never an error and never a crash.
//! That silence is the point: under storage contention the deadline is
//! exceeded and the only externally visible symptom is a declined payment.
//!
//! ## Contract
//!
//! - One timed attempt per transaction. Retry policy belongs to the caller,
//!   and the orchestrator deliberately has none.
//! - A code is issued at most once per transaction and is never
//!   regenerated.
//! - A terminal `Failed` status aborts the wait immediately rather than
//!   burning the remaining budget.

pub mod domain;
pub mod service;

pub use domain::{synthesize_code, GenerateOutcome};
pub use service::CodeGenerator;
