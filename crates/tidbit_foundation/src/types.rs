//! Type tags and classification.
//!
//! Every [`Value`] maps to exactly one [`TypeTag`], and every tag maps to one
//! structural [`Category`]. The deep cloner dispatches on the category.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::value::Value;

/// Canonical lowercase classification of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TypeTag {
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// Boolean.
    Boolean,
    /// Double-precision number.
    Number,
    /// String.
    String,
    /// Ordered sequence container.
    Array,
    /// Keyed mapping container.
    Object,
    /// Date instance.
    Date,
    /// Regular expression.
    #[cfg_attr(feature = "serde", serde(rename = "regexp"))]
    RegExp,
    /// Set collection.
    Set,
    /// Map collection.
    Map,
    /// Function.
    Function,
}

/// Structural category used for clone dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// Container indexed by position.
    Sequence,
    /// Container indexed by string key.
    Mapping,
    /// Anything else; carried over by identity.
    Opaque,
}

impl TypeTag {
    /// All tags, in declaration order.
    pub const ALL: [TypeTag; 12] = [
        Self::Undefined,
        Self::Null,
        Self::Boolean,
        Self::Number,
        Self::String,
        Self::Array,
        Self::Object,
        Self::Date,
        Self::RegExp,
        Self::Set,
        Self::Map,
        Self::Function,
    ];

    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
            Self::RegExp => "regexp",
            Self::Set => "set",
            Self::Map => "map",
            Self::Function => "function",
        }
    }

    /// Returns the structural category of this tag.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Array => Category::Sequence,
            Self::Object => Category::Mapping,
            Self::Undefined
            | Self::Null
            | Self::Boolean
            | Self::Number
            | Self::String
            | Self::Date
            | Self::RegExp
            | Self::Set
            | Self::Map
            | Self::Function => Category::Opaque,
        }
    }

    /// Returns true for `array` and `object`.
    #[must_use]
    pub const fn is_container(self) -> bool {
        !matches!(self.category(), Category::Opaque)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("unknown type tag: {s}")))
    }
}

/// Classifies a value. Never fails.
#[must_use]
pub fn classify(value: &Value) -> TypeTag {
    value.type_tag()
}
