//! Domain layer of the orchestrator.

pub mod errors;

pub use errors::PaymentError;
