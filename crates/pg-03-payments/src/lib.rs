//! # Payment Orchestrator Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Drives one payment attempt end to end: validate the request, persist the
//! intent, wait for the one-time code under the generation deadline, and
//! later verify the submitted code. The orchestrator composes the intent
//! store and the code generator behind transport-independent request and
//! response shapes; no HTTP server lives here.
//!
//! ## Failure surface
//!
//! Every business-level failure (timeout, expired code, mismatch, bad
//! state) is a value in the response payload with `success=false` or a
//! rejected status. Only a store invariant break surfaces as
//! [`PaymentError`]. A wave of declined payments therefore leaves the
//! process healthy, which is exactly the silent failure mode under study.

pub mod api;
pub mod domain;
pub mod service;

pub use api::{HealthStatus, InitiateResponse, PaymentRequest, VerifyRequest, VerifyResponse, VerifyStatus};
pub use domain::PaymentError;
pub use service::PaymentService;
