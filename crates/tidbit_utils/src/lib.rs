//! Formatting and inspection helpers for tidbit values.
//!
//! This crate provides:
//! - [`number`] - Percentages, fixed decimals, thousands separators
//! - [`date`] - Date patterns and leap years
//! - [`platform`] - Browser and platform detection from user agents
//! - [`predicates`] - Nullish, emptiness and plain-object checks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod date;
pub mod number;
pub mod platform;
pub mod predicates;

pub use config::{DEFAULT_PRECISION, FormatConfig};
pub use date::{
    DateFormat, format_date, format_date_in, format_date_with_config, is_leap_year,
    parse_date_string,
};
pub use number::{
    mili_format, mili_format_lossy, to_decimal, to_decimal_with, to_decimal_with_config,
    to_percent, to_percent_with, to_percent_with_config,
};
pub use platform::{Browser, Platform, browser_version, detect_browser, judge_platform};
pub use predicates::{is_empty, is_plain_object, is_undef};
