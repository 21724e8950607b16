//! Opaque reference values: dates, regular expressions, and functions.
//!
//! These are never recursed into by the deep cloner. A clone aliases them.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};

use crate::collections::node_id;
use crate::error::{Error, ErrorKind};
use crate::value::Value;

/// Largest absolute time value, in milliseconds, a date can hold.
pub const MAX_TIME_VALUE: f64 = 8.64e15;

// =============================================================================
// DateRef
// =============================================================================

/// Mutable date holding milliseconds since the Unix epoch.
///
/// An invalid date holds NaN.
#[derive(Clone)]
pub struct DateRef(Arc<RwLock<f64>>);

/// Clamps a raw time value: non-finite or out-of-range becomes NaN,
/// everything else is truncated toward zero.
fn time_clip(millis: f64) -> f64 {
    if !millis.is_finite() || millis.abs() > MAX_TIME_VALUE {
        return f64::NAN;
    }
    // adding 0.0 turns -0 into +0
    millis.trunc() + 0.0
}

impl DateRef {
    /// Creates a date from epoch milliseconds.
    #[must_use]
    pub fn new(millis: f64) -> Self {
        Self(Arc::new(RwLock::new(time_clip(millis))))
    }

    /// Creates an invalid date.
    #[must_use]
    pub fn invalid() -> Self {
        Self::new(f64::NAN)
    }

    /// Creates a date for the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Creates a date from a chrono timestamp.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::new(datetime.timestamp_millis() as f64)
    }

    /// Returns the time value in milliseconds (NaN if invalid).
    #[must_use]
    pub fn time_value(&self) -> f64 {
        *self.0.read()
    }

    /// Returns true if the date holds a valid time value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.time_value().is_nan()
    }

    /// Sets the time value, returning the clipped value stored.
    pub fn set_time(&self, millis: f64) -> f64 {
        let clipped = time_clip(millis);
        *self.0.write() = clipped;
        clipped
    }

    /// Converts to a chrono timestamp in `tz`. `None` for invalid dates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_datetime<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        let millis = self.time_value();
        if millis.is_nan() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|dt| dt.with_timezone(tz))
    }

    /// ISO-8601 rendering in UTC, or `Invalid Date`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.to_datetime(&Utc).map_or_else(
            || "Invalid Date".to_string(),
            |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Returns true if both handles point at the same date.
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

impl fmt::Debug for DateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.to_iso_string())
    }
}

// =============================================================================
// RegExpRef
// =============================================================================

/// Compiled regular expression with its original source and flags.
#[derive(Debug)]
pub struct RegExpData {
    source: Arc<str>,
    flags: Arc<str>,
    regex: Regex,
}

/// Shared regular expression.
#[derive(Clone)]
pub struct RegExpRef(Arc<RegExpData>);

impl RegExpRef {
    /// Compiles `source` with `flags`.
    ///
    /// Supported flags: `i` (case-insensitive), `m` (multi-line), `s`
    /// (dot matches newline). `g`, `u`, `y`, `d` and `v` are recorded but do
    /// not affect matching. Unknown or repeated flags are rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegExp` if a flag is invalid or the source fails to compile.
    pub fn new(source: &str, flags: &str) -> crate::Result<Self> {
        let mut builder = RegexBuilder::new(source);
        let mut seen = String::new();
        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(Error::new(ErrorKind::InvalidRegExp(format!(
                    "duplicate flag '{flag}'"
                ))));
            }
            seen.push(flag);
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'y' | 'd' | 'v' => {}
                other => {
                    return Err(Error::new(ErrorKind::InvalidRegExp(format!(
                        "unknown flag '{other}'"
                    ))));
                }
            }
        }
        let regex = builder
            .build()
            .map_err(|e| Error::new(ErrorKind::InvalidRegExp(e.to_string())))?;
        Ok(Self(Arc::new(RegExpData {
            source: source.into(),
            flags: flags.into(),
            regex,
        })))
    }

    /// Pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// Flags as given.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    /// Returns true if the pattern matches anywhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.regex.is_match(haystack)
    }

    /// Returns true if both handles point at the same pattern.
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

impl fmt::Debug for RegExpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for RegExpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags())
    }
}

// =============================================================================
// FunctionRef
// =============================================================================

/// Native function pointer.
pub type NativeFnPtr = fn(&[Value]) -> crate::Result<Value>;

/// Native function with a name for debugging.
pub struct NativeFunction {
    /// Function name.
    pub name: Arc<str>,
    /// Function pointer.
    pub func: NativeFnPtr,
}

/// Shared function value.
#[derive(Clone)]
pub struct FunctionRef(Arc<NativeFunction>);

impl FunctionRef {
    /// Wraps a native function.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, func: NativeFnPtr) -> Self {
        Self(Arc::new(NativeFunction {
            name: name.into(),
            func,
        }))
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Propagates whatever the function returns.
    pub fn call(&self, args: &[Value]) -> crate::Result<Value> {
        (self.0.func)(args)
    }

    /// Returns true if both handles point at the same function.
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

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name())
    }
}
