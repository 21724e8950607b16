//! Value model, type tags, deep cloning, and errors for tidbit.
//!
//! This crate provides:
//! - [`Value`] - A dynamic value with shared, identity-bearing containers
//! - [`TypeTag`] and [`classify`] - Canonical lowercase type classification
//! - [`deep_clone`] - Structural cloning with cycle detection
//! - [`Error`] - Rich error types with context
//! - [`conversions`] - Numeric coercion and rendering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clone;
pub mod collections;
pub mod conversions;
pub mod error;
pub mod opaque;
pub mod types;
pub mod value;

pub use clone::{CloneConfig, deep_clone, deep_clone_with};
pub use collections::{ArrayRef, MapRef, ObjectData, ObjectRef, Prototype, SetRef};
pub use error::{Error, ErrorContext, ErrorKind, PathSegment, SemanticLimit};
pub use opaque::{DateRef, FunctionRef, NativeFnPtr, RegExpRef};
pub use types::{Category, TypeTag, classify};
pub use value::{Structure, Value};

/// Result type for tidbit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural equality; see [`Value::deep_eq`].
#[must_use]
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    a.deep_eq(b)
}
