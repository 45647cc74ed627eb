//! Ports for the intent store subsystem.

pub mod inbound;

pub use inbound::IntentStore;
