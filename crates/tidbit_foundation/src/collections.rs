//! Shared, mutable collection handles.
//!
//! Each handle is an `Arc` around a `parking_lot::RwLock`, so cloning a handle
//! aliases the same node. Identity is exposed through `ptr_eq` and `id`.
//! Arrays are backed by `im::Vector`, which lets traversals take an O(1)
//! snapshot and release the lock before recursing.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

use crate::value::Value;

/// Address of an `Arc` allocation, used as node identity.
pub(crate) fn node_id<T: ?Sized>(arc: &Arc<T>) -> usize {
    Arc::as_ptr(arc).cast::<()>() as usize
}

// =============================================================================
// ArrayRef
// =============================================================================

/// Ordered sequence container.
#[derive(Clone, Default)]
pub struct ArrayRef(Arc<RwLock<im::Vector<Value>>>);

impl ArrayRef {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing vector in a fresh node.
    #[must_use]
    pub fn from_vector(items: im::Vector<Value>) -> Self {
        Self(Arc::new(RwLock::new(items)))
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// Returns true if the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Gets a copy of the element handle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Appends an element.
    pub fn push(&self, value: Value) {
        self.0.write().push_back(value);
    }

    /// Removes and returns the last element.
    pub fn pop(&self) -> Option<Value> {
        self.0.write().pop_back()
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the array untouched if `index` is out of bounds.
    pub fn set(&self, index: usize, value: Value) -> Option<Value> {
        let mut items = self.0.write();
        if index >= items.len() {
            return None;
        }
        Some(items.set(index, value))
    }

    /// Takes an O(1) snapshot of the current elements.
    #[must_use]
    pub fn snapshot(&self) -> im::Vector<Value> {
        self.0.read().clone()
    }

    /// Copies the current elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().iter().cloned().collect()
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Node identity.
    #[must_use]
    pub fn id(&self) -> usize {
        node_id(&self.0)
    }
}

impl FromIterator<Value> for ArrayRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_vector(iter.into_iter().collect())
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayRef(#{:x}, len={})", self.id(), self.len())
    }
}

// =============================================================================
// ObjectRef
// =============================================================================

/// Prototype marker of an object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Prototype {
    /// The plain object prototype (object literals).
    #[default]
    Object,
    /// No prototype at all.
    Null,
    /// Instance of a named class.
    Class(Arc<str>),
}

/// Contents of an object node.
#[derive(Clone, Debug, Default)]
pub struct ObjectData {
    /// Prototype marker.
    pub prototype: Prototype,
    /// Own enumerable properties, in insertion order.
    pub entries: IndexMap<Arc<str>, Value>,
}

/// Insertion-ordered, string-keyed mapping container.
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    /// Creates an empty plain object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object with the given prototype.
    #[must_use]
    pub fn with_prototype(prototype: Prototype) -> Self {
        Self(Arc::new(RwLock::new(ObjectData {
            prototype,
            entries: IndexMap::new(),
        })))
    }

    /// Returns the prototype marker.
    #[must_use]
    pub fn prototype(&self) -> Prototype {
        self.0.read().prototype.clone()
    }

    /// Returns the number of own keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().entries.len()
    }

    /// Returns true if the object has no own keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().entries.is_empty()
    }

    /// Gets a copy of the value handle under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().entries.get(key).cloned()
    }

    /// Returns true if `key` is an own key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().entries.contains_key(key)
    }

    /// Sets `key`, returning the previous value. New keys go last.
    pub fn insert(&self, key: impl Into<Arc<str>>, value: Value) -> Option<Value> {
        self.0.write().entries.insert(key.into(), value)
    }

    /// Removes `key`, keeping the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().entries.shift_remove(key)
    }

    /// Own keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<Arc<str>> {
        self.0.read().entries.keys().cloned().collect()
    }

    /// Snapshot of own entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Arc<str>, Value)> {
        self.0
            .read()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Node identity.
    #[must_use]
    pub fn id(&self) -> usize {
        node_id(&self.0)
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, Value)> for ObjectRef {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self(Arc::new(RwLock::new(ObjectData {
            prototype: Prototype::Object,
            entries,
        })))
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef(#{:x}, keys={})", self.id(), self.len())
    }
}

// =============================================================================
// SetRef
// =============================================================================

/// Insertion-ordered set. Membership follows `Value` equality.
#[derive(Clone, Default)]
pub struct SetRef(Arc<RwLock<IndexSet<Value>>>);

impl SetRef {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.read().len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Adds a value. Returns false if it was already present.
    pub fn insert(&self, value: Value) -> bool {
        self.0.write().insert(value)
    }

    /// Returns true if the value is present.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.read().contains(value)
    }

    /// Removes a value. Returns true if it was present.
    pub fn remove(&self, value: &Value) -> bool {
        self.0.write().shift_remove(value)
    }

    /// Snapshot of the elements in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.read().iter().cloned().collect()
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Node identity.
    #[must_use]
    pub fn id(&self) -> usize {
        node_id(&self.0)
    }
}

impl FromIterator<Value> for SetRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Arc::new(RwLock::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for SetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetRef(#{:x}, size={})", self.id(), self.size())
    }
}

// =============================================================================
// MapRef
// =============================================================================

/// Insertion-ordered map with arbitrary value keys.
#[derive(Clone, Default)]
pub struct MapRef(Arc<RwLock<IndexMap<Value, Value>>>);

impl MapRef {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.read().len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Sets `key`, returning the previous value.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        self.0.write().insert(key, value)
    }

    /// Gets a copy of the value handle under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&self, key: &Value) -> Option<Value> {
        self.0.write().shift_remove(key)
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Node identity.
    #[must_use]
    pub fn id(&self) -> usize {
        node_id(&self.0)
    }
}

impl FromIterator<(Value, Value)> for MapRef {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self(Arc::new(RwLock::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapRef(#{:x}, size={})", self.id(), self.size())
    }
}
