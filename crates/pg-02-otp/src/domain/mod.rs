//! Domain layer of the code generator.

pub mod code;

pub use code::{synthesize_code, GenerateOutcome};
