//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, TypeTag, Error, and deep cloning.

mod clone;
mod errors;
