//! Service layer of the code generator.

pub mod generator;

pub use generator::CodeGenerator;
