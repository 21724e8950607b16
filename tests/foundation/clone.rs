//! Integration tests for deep cloning
//!
//! Tests independence of cloned containers, identity of opaque values,
//! cycle detection, and depth limits.

use std::sync::Arc;
use std::thread;

use tidbit_foundation::{
    ArrayRef, CloneConfig, DateRef, ErrorKind, ObjectRef, SemanticLimit, Value, classify,
    deep_clone, deep_clone_with,
};

fn sample() -> Value {
    Value::object([(
        "a",
        Value::array([Value::from(1), Value::object([("b", Value::from(2))])]),
    )])
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn clone_matches_source_with_new_nodes() {
    let input = sample();
    let result = deep_clone(&input).unwrap();
    assert!(result.deep_eq(&input));

    let in_a = input.as_object().unwrap().get("a").unwrap();
    let out_a = result.as_object().unwrap().get("a").unwrap();
    assert!(!in_a.as_array().unwrap().ptr_eq(out_a.as_array().unwrap()));

    let in_b = in_a.as_array().unwrap().get(1).unwrap();
    let out_b = out_a.as_array().unwrap().get(1).unwrap();
    assert!(!in_b.as_object().unwrap().ptr_eq(out_b.as_object().unwrap()));
}

#[test]
fn mutation_is_isolated_both_ways() {
    let input = sample();
    let result = deep_clone(&input).unwrap();

    result.as_object().unwrap().insert("c", Value::from(3));
    assert!(!input.as_object().unwrap().contains_key("c"));

    let in_a = input.as_object().unwrap().get("a").unwrap();
    in_a.as_array().unwrap().set(0, Value::from(100));
    let out_a = result.as_object().unwrap().get("a").unwrap();
    assert_eq!(out_a.as_array().unwrap().get(0), Some(Value::from(1)));
}

#[test]
fn primitives_and_opaque_values_keep_identity() {
    assert_eq!(deep_clone(&Value::from(42)).unwrap(), Value::from(42));
    assert_eq!(deep_clone(&Value::from("x")).unwrap(), Value::from("x"));

    let date = DateRef::new(1_000.0);
    let cloned = deep_clone(&Value::Date(date.clone())).unwrap();
    assert!(cloned.as_date().unwrap().ptr_eq(&date));
}

#[test]
fn classification_round_trips() {
    for v in [
        sample(),
        Value::empty_array(),
        Value::Undefined,
        Value::from(f64::NAN),
        Value::Object(ObjectRef::with_prototype(tidbit_foundation::Prototype::Null)),
    ] {
        assert_eq!(classify(&deep_clone(&v).unwrap()), classify(&v));
    }
}

#[test]
fn clone_of_class_instance_is_plain() {
    let instance = ObjectRef::with_prototype(tidbit_foundation::Prototype::Class("Point".into()));
    instance.insert("x", Value::from(1));
    let cloned = deep_clone(&Value::Object(instance)).unwrap();
    assert_eq!(
        cloned.as_object().unwrap().prototype(),
        tidbit_foundation::Prototype::Object
    );
}

// =============================================================================
// Cycles and Limits
// =============================================================================

#[test]
fn self_referencing_array_fails() {
    let array = ArrayRef::new();
    array.push(Value::from(1));
    array.push(Value::Array(array.clone()));

    let err = deep_clone(&Value::Array(array.clone())).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicStructure));
    assert_eq!(err.context.unwrap().path_string(), "$[1]");
    array.pop();
}

#[test]
fn diamond_sharing_is_cloned_per_path() {
    let shared = Value::object([("v", Value::from(1))]);
    let input = Value::object([("left", shared.clone()), ("right", shared.clone())]);
    let result = deep_clone(&input).unwrap();
    let object = result.as_object().unwrap();
    let left = object.get("left").unwrap();
    let right = object.get("right").unwrap();
    assert!(left.deep_eq(&shared));
    assert!(right.deep_eq(&shared));
    assert_ne!(left.node_id(), right.node_id());
    assert_ne!(left.node_id(), shared.node_id());
}

#[test]
fn depth_limit() {
    let deep = Value::object([("a", Value::object([("b", Value::empty_array())]))]);
    let err = deep_clone_with(&deep, &CloneConfig::new().with_max_depth(1)).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxDepth { limit: 1 })
    ));
    assert_eq!(err.context.unwrap().path_string(), "$.a");
    assert!(deep_clone_with(&deep, &CloneConfig::new().with_max_depth(3)).is_ok());
    assert!(deep_clone_with(&Value::from(1), &CloneConfig::new().with_max_depth(0)).is_ok());
}

// =============================================================================
// Threads
// =============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn values_are_send_and_sync() {
    assert_send_sync::<Value>();
    assert_send_sync::<CloneConfig>();
    assert_send_sync::<tidbit_foundation::Error>();
}

#[test]
fn clone_from_many_threads() {
    let shared = Arc::new(sample());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&shared);
            thread::spawn(move || {
                let cloned = deep_clone(&source).unwrap();
                assert!(cloned.deep_eq(&source));
                assert_eq!(classify(&cloned), classify(&source));
                cloned.as_object().unwrap().insert("t", Value::from(1));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(!shared.as_object().unwrap().contains_key("t"));
}
