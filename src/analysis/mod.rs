// src/analysis/mod.rs
pub mod aggregate;
pub mod resolver;

// Re-export commonly used types
pub use aggregate::{national_summary, NATIONAL_NAME};
pub use resolver::{Lookup, StateResolver};
