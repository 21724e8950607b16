//! Value predicates.

use tidbit_foundation::{Error, ErrorContext, Prototype, Result, Value};

/// True for `undefined` and `null`.
#[must_use]
pub const fn is_undef(val: &Value) -> bool {
    val.is_nullish()
}

/// Emptiness of strings, arrays, objects, sets and maps. Every other value
/// is never empty.
///
/// # Errors
///
/// Fails on `undefined` and `null`.
pub fn is_empty(val: &Value) -> Result<bool> {
    let empty = match val {
        Value::Undefined | Value::Null => {
            return Err(Error::invalid_input(format!("value is not defined: {val:?}"))
                .with_context(ErrorContext::new().with_operation("is_empty")));
        }
        Value::String(s) => s.is_empty(),
        Value::Array(array) => array.is_empty(),
        Value::Object(object) => object.is_empty(),
        Value::Set(set) => set.is_empty(),
        Value::Map(map) => map.is_empty(),
        Value::Bool(_)
        | Value::Number(_)
        | Value::Date(_)
        | Value::RegExp(_)
        | Value::Function(_) => false,
    };
    Ok(empty)
}

/// True only for objects whose prototype is the plain object prototype.
#[must_use]
pub fn is_plain_object(val: &Value) -> bool {
    matches!(val, Value::Object(object) if object.prototype() == Prototype::Object)
}
