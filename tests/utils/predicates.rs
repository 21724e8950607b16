//! Integration tests for value predicates

use tidbit_foundation::{ObjectRef, Prototype, SetRef, Value, deep_clone};
use tidbit_utils::{is_empty, is_plain_object, is_undef};

#[test]
fn undef_matches_nullish_only() {
    assert!(is_undef(&Value::Undefined));
    assert!(is_undef(&Value::Null));
    assert!(!is_undef(&Value::from(f64::NAN)));
    assert!(!is_undef(&Value::empty_object()));
}

#[test]
fn emptiness() {
    assert!(is_empty(&Value::from("")).unwrap());
    assert!(is_empty(&Value::empty_array()).unwrap());
    assert!(is_empty(&Value::Object(ObjectRef::with_prototype(Prototype::Null))).unwrap());
    assert!(is_empty(&Value::Set(SetRef::new())).unwrap());
    assert!(!is_empty(&Value::array([Value::Undefined])).unwrap());
    assert!(!is_empty(&Value::from(0)).unwrap());
    assert!(is_empty(&Value::Undefined).unwrap_err().is_invalid_input());
}

#[test]
fn plain_objects() {
    assert!(is_plain_object(&Value::object([("a", Value::from(1))])));
    assert!(!is_plain_object(&Value::Object(ObjectRef::with_prototype(Prototype::Null))));
    assert!(!is_plain_object(&Value::from("{}")));

    let instance = ObjectRef::with_prototype(Prototype::Class("User".into()));
    let instance = Value::Object(instance);
    assert!(!is_plain_object(&instance));
    assert!(is_plain_object(&deep_clone(&instance).unwrap()));
}
