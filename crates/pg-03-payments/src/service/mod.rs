//! Service layer of the orchestrator.

pub mod orchestrator;

pub use orchestrator::PaymentService;
