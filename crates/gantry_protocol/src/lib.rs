//! Canonical types shared across Gantry crates.
//!
//! Gantry exports event data into customer-owned warehouses, and every layer
//! that touches a column (schema definition, reconciliation, the sink side)
//! has to agree on what a column's type *is*. This crate owns that
//! vocabulary so there is exactly one definition to agree on.

pub mod types;

// Re-export types for convenience
pub use types::{DataType, ParseDataTypeError};
