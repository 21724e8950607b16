//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use tidbit_foundation::{
    Error, ErrorContext, ErrorKind, PathSegment, RegExpRef, SemanticLimit, TypeTag,
};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_input() {
    let err = Error::invalid_input("val is not a number");
    assert!(err.is_invalid_input());
    assert_eq!(format!("{err}"), "invalid input: val is not a number");
}

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch("string or number", TypeTag::Boolean);
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch { actual: TypeTag::Boolean, .. }
    ));
    assert!(err.is_invalid_input());
    let msg = format!("{err}");
    assert!(msg.contains("string or number"));
    assert!(msg.contains("boolean"));
}

#[test]
fn error_cyclic_structure() {
    let err = Error::cyclic_structure();
    assert!(matches!(err.kind, ErrorKind::CyclicStructure));
    assert!(!err.is_invalid_input());
    assert!(format!("{err}").contains("cyclic"));
}

#[test]
fn error_limit_exceeded() {
    let err = Error::limit_exceeded(SemanticLimit::MaxDepth { limit: 8 });
    assert_eq!(format!("{err}"), "limit exceeded: max depth (8) exceeded");
}

#[test]
fn error_invalid_regexp() {
    let err = RegExpRef::new("(", "").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRegExp(_)));
    assert!(RegExpRef::new("a", "q").is_err());
    assert!(RegExpRef::new("a", "gg").is_err());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_path_rendering() {
    let ctx = ErrorContext::new()
        .with_operation("deep_clone")
        .with_path(vec!["a".into(), PathSegment::Index(1), "b".into()]);
    assert_eq!(ctx.path_string(), "$.a[1].b");
    assert_eq!(ctx.to_string(), "in deep_clone at $.a[1].b");
}

#[test]
fn context_is_attached() {
    let err = Error::cyclic_structure().with_context(ErrorContext::new().with_operation("x"));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.operation.as_deref(), Some("x"));
    assert_eq!(ctx.path_string(), "$");
}

#[test]
fn key_segments_never_render_as_indexes() {
    let ctx = ErrorContext::new().with_path(vec!["[2]".into(), 2usize.into()]);
    assert_eq!(ctx.path_string(), "$.[2][2]");
    assert_eq!(PathSegment::from("x").to_string(), ".x");
    assert_eq!(PathSegment::Index(3).to_string(), "[3]");
}
