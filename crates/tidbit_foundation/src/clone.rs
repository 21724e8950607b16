//! Deep structural cloning.
//!
//! Arrays and objects are rebuilt node by node; every other value is carried
//! over by identity. A clone shares no container with its source, but dates,
//! regular expressions, sets, maps and functions inside it alias the
//! originals.
//!
//! Cycles are detected with a set of node identities on the current ancestor
//! path and reported as [`ErrorKind::CyclicStructure`](crate::ErrorKind).
//! A node reachable along two different paths is not a cycle and is cloned
//! once per path.
//!
//! Recursion follows the nesting of the input. With the default configuration
//! depth is unbounded, so a very deep acyclic value (tens of thousands of
//! levels) can overflow the stack. Set [`CloneConfig::with_max_depth`] when
//! cloning untrusted input.

use std::collections::HashSet;

use tracing::debug;

use crate::collections::{ArrayRef, ObjectRef};
use crate::error::{Error, ErrorContext, PathSegment, SemanticLimit};
use crate::value::{Structure, Value};
use crate::Result;

/// Configuration for deep cloning.
#[derive(Clone, Debug, Default)]
pub struct CloneConfig {
    /// Maximum container nesting depth (`None` = unbounded).
    pub max_depth: Option<usize>,
}

impl CloneConfig {
    /// Creates the default configuration (unbounded depth).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to bound the container nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Deep-clones a value with the default configuration.
///
/// # Errors
///
/// Returns `CyclicStructure` if a container contains one of its ancestors.
pub fn deep_clone(value: &Value) -> Result<Value> {
    deep_clone_with(value, &CloneConfig::default())
}

/// Deep-clones a value.
///
/// # Errors
///
/// Returns `CyclicStructure` if a container contains one of its ancestors,
/// or `LimitExceeded` if nesting goes past `config.max_depth`. The error
/// context carries the key path to the offending node.
pub fn deep_clone_with(value: &Value, config: &CloneConfig) -> Result<Value> {
    let mut cloner = DeepCloner::new(config);
    cloner.clone_value(value).map_err(|err| {
        err.with_context(
            ErrorContext::new()
                .with_operation("deep_clone")
                .with_path(std::mem::take(&mut cloner.path)),
        )
    })
}

/// Recursive clone state for one call.
struct DeepCloner<'a> {
    config: &'a CloneConfig,
    ancestors: HashSet<usize>,
    path: Vec<PathSegment>,
}

impl<'a> DeepCloner<'a> {
    fn new(config: &'a CloneConfig) -> Self {
        Self {
            config,
            ancestors: HashSet::new(),
            path: Vec::new(),
        }
    }

    // On error the path is left pointing at the failing node.
    fn clone_value(&mut self, value: &Value) -> Result<Value> {
        match value.structure() {
            Structure::Sequence(array) => {
                self.enter(array.id())?;
                let items = array.snapshot();
                let mut cloned = im::Vector::new();
                for (index, item) in items.iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    cloned.push_back(self.clone_value(item)?);
                    self.path.pop();
                }
                self.ancestors.remove(&array.id());
                Ok(Value::Array(ArrayRef::from_vector(cloned)))
            }
            Structure::Mapping(object) => {
                self.enter(object.id())?;
                let cloned = ObjectRef::new();
                for (key, item) in object.entries() {
                    self.path.push(PathSegment::Key(key.clone()));
                    let item = self.clone_value(&item)?;
                    cloned.insert(key, item);
                    self.path.pop();
                }
                self.ancestors.remove(&object.id());
                Ok(Value::Object(cloned))
            }
            Structure::Opaque(value) => Ok(value.clone()),
        }
    }

    fn enter(&mut self, id: usize) -> Result<()> {
        if self.ancestors.contains(&id) {
            debug!(depth = self.ancestors.len(), "cycle detected during deep clone");
            return Err(Error::cyclic_structure());
        }
        if let Some(limit) = self.config.max_depth {
            if self.ancestors.len() >= limit {
                return Err(Error::limit_exceeded(SemanticLimit::MaxDepth { limit }));
            }
        }
        self.ancestors.insert(id);
        Ok(())
    }
}
