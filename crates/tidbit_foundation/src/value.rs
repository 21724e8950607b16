//! Core value type for all tidbit data.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::collections::{ArrayRef, MapRef, ObjectRef, SetRef};
use crate::conversions::number_to_string;
use crate::opaque::{DateRef, FunctionRef, RegExpRef};
use crate::types::TypeTag;

/// A dynamic value of unknown shape.
///
/// Primitives are held inline. Every other variant is a shared handle with
/// identity: the Rust `Clone` of a `Value` is shallow and aliases the same
/// node. Use [`crate::deep_clone`] for an independent copy of containers.
///
/// Equality and hashing follow SameValueZero: primitives compare by content
/// (NaN equals NaN, `+0` equals `-0`), handles compare by identity. Use
/// [`Value::deep_eq`] for structural comparison.
#[derive(Clone, Default)]
pub enum Value {
    /// The undefined value.
    #[default]
    Undefined,
    /// The null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// Immutable string.
    String(Arc<str>),
    /// Ordered sequence container.
    Array(ArrayRef),
    /// String-keyed mapping container.
    Object(ObjectRef),
    /// Date instance.
    Date(DateRef),
    /// Regular expression.
    RegExp(RegExpRef),
    /// Set collection.
    Set(SetRef),
    /// Map collection.
    Map(MapRef),
    /// Function.
    Function(FunctionRef),
}

/// Structural view of a value, resolved from its type tag.
#[derive(Clone, Copy, Debug)]
pub enum Structure<'a> {
    /// An `array`.
    Sequence(&'a ArrayRef),
    /// An `object`.
    Mapping(&'a ObjectRef),
    /// Anything else.
    Opaque(&'a Value),
}

impl Value {
    /// Returns the canonical type tag of this value.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Undefined => TypeTag::Undefined,
            Self::Null => TypeTag::Null,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Array(_) => TypeTag::Array,
            Self::Object(_) => TypeTag::Object,
            Self::Date(_) => TypeTag::Date,
            Self::RegExp(_) => TypeTag::RegExp,
            Self::Set(_) => TypeTag::Set,
            Self::Map(_) => TypeTag::Map,
            Self::Function(_) => TypeTag::Function,
        }
    }

    /// Returns the structural view used for clone dispatch.
    #[must_use]
    pub const fn structure(&self) -> Structure<'_> {
        match self {
            Self::Array(array) => Structure::Sequence(array),
            Self::Object(object) => Structure::Mapping(object),
            _ => Structure::Opaque(self),
        }
    }

    /// Creates a new array from anything convertible to values.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Creates a new empty array.
    #[must_use]
    pub fn empty_array() -> Self {
        Self::Array(ArrayRef::new())
    }

    /// Creates a new plain object from key/value pairs.
    pub fn object<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    /// Creates a new empty plain object.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(ObjectRef::new())
    }

    /// Creates a new date from epoch milliseconds.
    #[must_use]
    pub fn date(millis: f64) -> Self {
        Self::Date(DateRef::new(millis))
    }

    /// Returns true if this value is undefined.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this value is null or undefined.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an array handle.
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Attempts to extract an object handle.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Attempts to extract a date handle.
    #[must_use]
    pub const fn as_date(&self) -> Option<&DateRef> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Attempts to extract a regular expression handle.
    #[must_use]
    pub const fn as_regexp(&self) -> Option<&RegExpRef> {
        match self {
            Self::RegExp(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to extract a set handle.
    #[must_use]
    pub const fn as_set(&self) -> Option<&SetRef> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a map handle.
    #[must_use]
    pub const fn as_map(&self) -> Option<&MapRef> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a function handle.
    #[must_use]
    pub const fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Identity of the referenced node; `None` for primitives.
    #[must_use]
    pub fn node_id(&self) -> Option<usize> {
        match self {
            Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => {
                None
            }
            Self::Array(a) => Some(a.id()),
            Self::Object(o) => Some(o.id()),
            Self::Date(d) => Some(d.id()),
            Self::RegExp(r) => Some(r.id()),
            Self::Set(s) => Some(s.id()),
            Self::Map(m) => Some(m.id()),
            Self::Function(f) => Some(f.id()),
        }
    }

    /// Structural equality.
    ///
    /// Arrays compare element-wise, objects by own key set and values
    /// (key order ignored, prototype ignored). Everything else compares with
    /// `==`. Terminates on cyclic input.
    #[must_use]
    pub fn deep_eq(&self, other: &Value) -> bool {
        deep_eq_inner(self, other, &mut HashSet::new())
    }
}

fn deep_eq_inner(a: &Value, b: &Value, visiting: &mut HashSet<(usize, usize)>) -> bool {
    match (a.structure(), b.structure()) {
        (Structure::Sequence(x), Structure::Sequence(y)) => {
            if x.ptr_eq(y) || !visiting.insert((x.id(), y.id())) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            let equal = xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(l, r)| deep_eq_inner(l, r, visiting));
            visiting.remove(&(x.id(), y.id()));
            equal
        }
        (Structure::Mapping(x), Structure::Mapping(y)) => {
            if x.ptr_eq(y) || !visiting.insert((x.id(), y.id())) {
                return true;
            }
            let xs = x.entries();
            let equal = xs.len() == y.len()
                && xs.iter().all(|(key, l)| {
                    y.get(key)
                        .is_some_and(|r| deep_eq_inner(l, &r, visiting))
                });
            visiting.remove(&(x.id(), y.id()));
            equal
        }
        (Structure::Opaque(l), Structure::Opaque(r)) => l == r,
        _ => false,
    }
}

/// Canonical bit pattern for hashing numbers under SameValueZero.
#[allow(clippy::float_cmp)]
fn number_key(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0.0f64.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Date(a), Self::Date(b)) => a.ptr_eq(b),
            (Self::RegExp(a), Self::RegExp(b)) => a.ptr_eq(b),
            (Self::Set(a), Self::Set(b)) => a.ptr_eq(b),
            (Self::Map(a), Self::Map(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => number_key(*n).hash(state),
            Self::String(s) => s.hash(state),
            _ => self.node_id().hash(state),
        }
    }
}

/// Writes the to-string rendering, joining arrays with `,`.
///
/// Nullish array elements and arrays already being joined render as empty.
fn write_string(value: &Value, f: &mut fmt::Formatter<'_>, joining: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&number_to_string(*n)),
        Value::String(s) => f.write_str(s),
        Value::Array(array) => {
            if joining.contains(&array.id()) {
                return Ok(());
            }
            joining.push(array.id());
            for (i, item) in array.snapshot().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                if !item.is_nullish() {
                    write_string(item, f, joining)?;
                }
            }
            joining.pop();
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
        Value::Date(d) => f.write_str(&d.to_iso_string()),
        Value::RegExp(r) => write!(f, "{r}"),
        Value::Set(_) => f.write_str("[object Set]"),
        Value::Map(_) => f.write_str("[object Map]"),
        Value::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
    }
}

fn write_debug(value: &Value, f: &mut fmt::Formatter<'_>, path: &mut Vec<usize>) -> fmt::Result {
    if let Some(id) = value.node_id() {
        if path.contains(&id) {
            return f.write_str("<cycle>");
        }
    }
    match value {
        Value::Array(array) => {
            path.push(array.id());
            f.write_str("[")?;
            for (i, item) in array.snapshot().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_debug(item, f, path)?;
            }
            path.pop();
            f.write_str("]")
        }
        Value::Object(object) => {
            path.push(object.id());
            f.write_str("{")?;
            for (i, (key, item)) in object.entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_debug(item, f, path)?;
            }
            path.pop();
            f.write_str("}")
        }
        Value::Set(set) => {
            path.push(set.id());
            f.write_str("Set{")?;
            for (i, item) in set.values().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_debug(item, f, path)?;
            }
            path.pop();
            f.write_str("}")
        }
        Value::Map(map) => {
            path.push(map.id());
            f.write_str("Map{")?;
            for (i, (key, item)) in map.entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_debug(key, f, path)?;
                f.write_str(" => ")?;
                write_debug(item, f, path)?;
            }
            path.pop();
            f.write_str("}")
        }
        Value::String(s) => write!(f, "{s:?}"),
        Value::Date(d) => write!(f, "{d:?}"),
        Value::Function(func) => write!(f, "{func:?}"),
        _ => write_string(value, f, &mut Vec::new()),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(self, f, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_string(self, f, &mut Vec::new())
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::array(v)
    }
}

impl From<ArrayRef> for Value {
    fn from(a: ArrayRef) -> Self {
        Self::Array(a)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Self::Object(o)
    }
}

impl From<DateRef> for Value {
    fn from(d: DateRef) -> Self {
        Self::Date(d)
    }
}

impl From<RegExpRef> for Value {
    fn from(r: RegExpRef) -> Self {
        Self::RegExp(r)
    }
}

impl From<SetRef> for Value {
    fn from(s: SetRef) -> Self {
        Self::Set(s)
    }
}

impl From<MapRef> for Value {
    fn from(m: MapRef) -> Self {
        Self::Map(m)
    }
}

impl From<FunctionRef> for Value {
    fn from(f: FunctionRef) -> Self {
        Self::Function(f)
    }
}
