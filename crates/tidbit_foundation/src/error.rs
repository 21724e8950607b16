//! Error types for tidbit.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::TypeTag;

/// The main error type for tidbit operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// Creates a type mismatch error.
    ///
    /// `expected` describes the accepted tags, e.g. `"string or number"`.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: TypeTag) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual,
        })
    }

    /// Creates a cyclic structure error.
    #[must_use]
    pub fn cyclic_structure() -> Self {
        Self::new(ErrorKind::CyclicStructure)
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Returns true if the input failed a type or parseability precondition.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidInput(_) | ErrorKind::TypeMismatch { .. } | ErrorKind::InvalidRegExp(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Input failed a value precondition (NaN, unparsable date, bad precision).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input had a type the operation does not accept.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Description of the accepted types.
        expected: String,
        /// The actual tag encountered.
        actual: TypeTag,
    },

    /// Regular expression source failed to compile.
    #[error("invalid regular expression: {0}")]
    InvalidRegExp(String),

    /// A container was reached again from inside itself.
    #[error("cyclic structure: value contains a reference to one of its ancestors")]
    CyclicStructure,

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),
}

/// Semantic limits that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Maximum container nesting depth exceeded during a traversal.
    MaxDepth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepth { limit } => write!(f, "max depth ({limit}) exceeded"),
        }
    }
}

/// One step of a key path into a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key.
    Key(Arc<str>),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<Arc<str>> for PathSegment {
    fn from(key: Arc<str>) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed, e.g. `deep_clone` or `to_percent`.
    pub operation: Option<String>,
    /// Key path from the root value to the failing node.
    pub path: Vec<PathSegment>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the key path to the failing node.
    #[must_use]
    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Renders the path as `$.a[1].b`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
            if !self.path.is_empty() {
                write!(f, " ")?;
            }
        }
        if !self.path.is_empty() {
            write!(f, "at {}", self.path_string())?;
        }
        Ok(())
    }
}
