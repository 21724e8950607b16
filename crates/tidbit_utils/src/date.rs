//! Date formatting and leap years.
//!
//! Dates are rendered from their calendar fields in a time zone. Month, day,
//! hour, minute and second are zero-padded to two digits; the year is printed
//! as is.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tidbit_foundation::conversions::to_number;
use tidbit_foundation::{DateRef, Error, ErrorContext, Result, TypeTag, Value};
use tracing::debug;

use crate::config::FormatConfig;

/// Supported date patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateFormat {
    /// `yyyy-MM-dd`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "yyyy-MM-dd"))]
    YearMonthDay,
    /// `yyyy-MM`
    #[cfg_attr(feature = "serde", serde(rename = "yyyy-MM"))]
    YearMonth,
    /// `MM-dd`
    #[cfg_attr(feature = "serde", serde(rename = "MM-dd"))]
    MonthDay,
    /// `yyyy-MM-dd HH:mm:ss`
    #[cfg_attr(feature = "serde", serde(rename = "yyyy-MM-dd HH:mm:ss"))]
    YearMonthDayTime,
    /// `yyyy-MM-dd HH:mm`
    #[cfg_attr(feature = "serde", serde(rename = "yyyy-MM-dd HH:mm"))]
    YearMonthDayHourMinute,
    /// `MM-dd HH:mm:ss`
    #[cfg_attr(feature = "serde", serde(rename = "MM-dd HH:mm:ss"))]
    MonthDayTime,
    /// `MM-dd HH:mm`
    #[cfg_attr(feature = "serde", serde(rename = "MM-dd HH:mm"))]
    MonthDayHourMinute,
    /// `HH:mm:ss`
    #[cfg_attr(feature = "serde", serde(rename = "HH:mm:ss"))]
    Time,
    /// `HH:mm`
    #[cfg_attr(feature = "serde", serde(rename = "HH:mm"))]
    HourMinute,
}

impl DateFormat {
    /// All supported patterns.
    pub const ALL: [DateFormat; 9] = [
        Self::YearMonthDay,
        Self::YearMonth,
        Self::MonthDay,
        Self::YearMonthDayTime,
        Self::YearMonthDayHourMinute,
        Self::MonthDayTime,
        Self::MonthDayHourMinute,
        Self::Time,
        Self::HourMinute,
    ];

    /// Pattern text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YearMonthDay => "yyyy-MM-dd",
            Self::YearMonth => "yyyy-MM",
            Self::MonthDay => "MM-dd",
            Self::YearMonthDayTime => "yyyy-MM-dd HH:mm:ss",
            Self::YearMonthDayHourMinute => "yyyy-MM-dd HH:mm",
            Self::MonthDayTime => "MM-dd HH:mm:ss",
            Self::MonthDayHourMinute => "MM-dd HH:mm",
            Self::Time => "HH:mm:ss",
            Self::HourMinute => "HH:mm",
        }
    }

    /// Looks up a pattern, falling back to `fallback` when it is unknown.
    #[must_use]
    pub fn parse_or(pattern: &str, fallback: DateFormat) -> Self {
        pattern.parse().unwrap_or_else(|_| {
            debug!(pattern, fallback = fallback.as_str(), "unknown date pattern");
            fallback
        })
    }

    /// Renders a timestamp with this pattern.
    #[must_use]
    pub fn render<Tz: TimeZone>(self, dt: &DateTime<Tz>) -> String {
        let year = dt.year();
        let month = format!("{:02}", dt.month());
        let day = format!("{:02}", dt.day());
        let hour = format!("{:02}", dt.hour());
        let minute = format!("{:02}", dt.minute());
        let second = format!("{:02}", dt.second());
        match self {
            Self::YearMonthDay => format!("{year}-{month}-{day}"),
            Self::YearMonth => format!("{year}-{month}"),
            Self::MonthDay => format!("{month}-{day}"),
            Self::YearMonthDayTime => format!("{year}-{month}-{day} {hour}:{minute}:{second}"),
            Self::YearMonthDayHourMinute => format!("{year}-{month}-{day} {hour}:{minute}"),
            Self::MonthDayTime => format!("{month}-{day} {hour}:{minute}:{second}"),
            Self::MonthDayHourMinute => format!("{month}-{day} {hour}:{minute}"),
            Self::Time => format!("{hour}:{minute}:{second}"),
            Self::HourMinute => format!("{hour}:{minute}"),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("unknown date pattern: {s}")))
    }
}

fn in_operation(operation: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| err.with_context(ErrorContext::new().with_operation(operation))
}

/// Date-time forms without an offset; read as wall-clock time in the zone.
const LOCAL_DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%dT%H:%M:%S",
];

/// Parses a date string to epoch milliseconds (NaN if unparsable).
///
/// - RFC 3339 timestamps with an offset are exact.
/// - `yyyy`, `yyyy-MM` and `yyyy-MM-dd` are midnight UTC.
/// - Date-times without an offset and `yyyy/MM/dd` forms are wall-clock time in `tz`.
/// - A plain integer is taken as epoch milliseconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_date_string<Tz: TimeZone>(text: &str, tz: &Tz) -> f64 {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.timestamp_millis() as f64;
    }

    let utc_date = match text.len() {
        4 => NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
    };
    if let Some(date) = utc_date.filter(|_| text.chars().all(|c| c.is_ascii_digit() || c == '-')) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Utc.from_utc_datetime(&midnight).timestamp_millis() as f64;
        }
    }

    let local = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y/%m/%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
    if let Some(naive) = local {
        return tz
            .from_local_datetime(&naive)
            .earliest()
            .map_or(f64::NAN, |dt| dt.timestamp_millis() as f64);
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return text.parse::<f64>().unwrap_or(f64::NAN);
    }
    f64::NAN
}

/// Turns a date, number or string into a valid date.
fn coerce_date<Tz: TimeZone>(date: &Value, tz: &Tz) -> Result<DateRef> {
    let coerced = match date {
        Value::Date(d) => d.clone(),
        Value::Number(n) => DateRef::new(*n),
        Value::String(s) => DateRef::new(parse_date_string(s, tz)),
        other => {
            return Err(Error::type_mismatch(
                "date, number or numeric string",
                other.type_tag(),
            ));
        }
    };
    if !coerced.is_valid() {
        return Err(Error::invalid_input(format!("invalid date value: {date}")));
    }
    Ok(coerced)
}

/// Formats a date in the local time zone. Unknown patterns fall back to
/// `yyyy-MM-dd`.
///
/// # Errors
///
/// Fails if `date` is not a date, number or string, or does not describe a
/// valid instant. Also fails for valid time values whose year lies beyond
/// what the calendar can represent (roughly year ±262143; time values reach
/// ±8.64e15 ms, about year ±275760).
pub fn format_date(date: &Value, pattern: &str) -> Result<String> {
    format_date_in(date, pattern, &Local)
}

/// Formats a date in `tz`. Unknown patterns fall back to `yyyy-MM-dd`.
///
/// # Errors
///
/// Same as [`format_date`].
pub fn format_date_in<Tz: TimeZone>(date: &Value, pattern: &str, tz: &Tz) -> Result<String> {
    format_date_with_config(date, pattern, tz, &FormatConfig::default())
}

/// Formats a date in `tz`, using the configured fallback pattern.
///
/// # Errors
///
/// Same as [`format_date`].
pub fn format_date_with_config<Tz: TimeZone>(
    date: &Value,
    pattern: &str,
    tz: &Tz,
    config: &FormatConfig,
) -> Result<String> {
    let format = DateFormat::parse_or(pattern, config.fallback_format);
    let date = coerce_date(date, tz).map_err(in_operation("format_date"))?;
    let dt = date.to_datetime(tz).ok_or_else(|| {
        Error::invalid_input(format!(
            "date is outside the supported calendar range: {}",
            date.time_value()
        ))
        .with_context(ErrorContext::new().with_operation("format_date"))
    })?;
    Ok(format.render(&dt))
}

/// Gregorian leap-year check.
///
/// # Errors
///
/// Fails if `year` is not a number or string, or does not coerce to a number.
#[allow(clippy::float_cmp)]
pub fn is_leap_year(year: &Value) -> Result<bool> {
    let tag = year.type_tag();
    if !matches!(tag, TypeTag::Number | TypeTag::String) {
        return Err(Error::type_mismatch("number or numeric string", tag)
            .with_context(ErrorContext::new().with_operation("is_leap_year")));
    }
    let n = to_number(year);
    if n.is_nan() {
        return Err(Error::invalid_input(format!("year is not a number: {year}"))
            .with_context(ErrorContext::new().with_operation("is_leap_year")));
    }
    Ok((n % 4.0 == 0.0 && n % 100.0 != 0.0) || n % 400.0 == 0.0)
}
