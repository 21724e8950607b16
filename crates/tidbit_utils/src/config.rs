//! Configuration for the formatting helpers.

use crate::date::DateFormat;

/// Default number of fraction digits for percentages and decimals.
pub const DEFAULT_PRECISION: u8 = 2;

/// Configuration for number and date formatting.
///
/// Controls the default precision and the pattern used when a requested
/// date pattern is not one of the supported ones.
#[derive(Clone, Debug)]
pub struct FormatConfig {
    /// Fraction digits used when the caller gives none.
    pub precision: u8,

    /// Pattern used for unknown date patterns.
    pub fallback_format: DateFormat,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            fallback_format: DateFormat::default(),
        }
    }
}

impl FormatConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the default precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method to set the fallback date pattern.
    #[must_use]
    pub fn with_fallback_format(mut self, format: DateFormat) -> Self {
        self.fallback_format = format;
        self
    }
}
