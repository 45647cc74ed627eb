//! # Shared Types
//!
//! Domain entities and configuration shared across the payment-gateway
//! subsystems. This crate is the Single Source of Truth for type
//! definitions; subsystem crates re-export from here rather than
//! duplicating shapes.
//!
//! ## Contents
//!
//! - `entities`: transaction records, the status state machine, one-time
//!   codes, audit kinds, reference masking.
//! - `config`: the read-only [`GatewayConfig`](config::GatewayConfig)
//!   snapshot (deadlines, simulated latencies, strategy selection).

pub mod config;
pub mod entities;

pub use config::{ConfigError, GatewayConfig, StorageStrategy};
pub use entities::{
    mask_reference, unix_ms, AuditKind, OneTimeCode, Timestamp, TransactionId, TransactionRecord,
    TransactionStatus,
};
