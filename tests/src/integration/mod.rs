//! Cross-subsystem integration scenarios.

pub mod contention;
