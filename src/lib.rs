//! Tidbit - dynamic values, deep cloning, and formatting helpers
//!
//! This crate re-exports both layers of the tidbit system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: tidbit_utils       Number, date, user-agent, and predicate helpers
//! Layer 0: tidbit_foundation  Core types (Value, TypeTag, Error), deep clone
//! ```

pub use tidbit_foundation as foundation;
pub use tidbit_utils as utils;
