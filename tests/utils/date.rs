//! Integration tests for date formatting
//!
//! Tests every supported pattern, fallback, coercion, and leap years.

use chrono::{FixedOffset, TimeZone, Utc};
use tidbit_foundation::{DateRef, Value};
use tidbit_utils::{DateFormat, FormatConfig, format_date, format_date_in, format_date_with_config, is_leap_year};

fn sample() -> Value {
    let dt = Utc.with_ymd_and_hms(2023, 7, 4, 9, 5, 7).unwrap();
    Value::Date(DateRef::from_datetime(&dt))
}

// =============================================================================
// Patterns
// =============================================================================

#[test]
fn all_patterns() {
    let date = sample();
    let cases = [
        ("yyyy-MM-dd", "2023-07-04"),
        ("yyyy-MM", "2023-07"),
        ("MM-dd", "07-04"),
        ("yyyy-MM-dd HH:mm:ss", "2023-07-04 09:05:07"),
        ("yyyy-MM-dd HH:mm", "2023-07-04 09:05"),
        ("MM-dd HH:mm:ss", "07-04 09:05:07"),
        ("MM-dd HH:mm", "07-04 09:05"),
        ("HH:mm:ss", "09:05:07"),
        ("HH:mm", "09:05"),
    ];
    for (pattern, expected) in cases {
        assert_eq!(format_date_in(&date, pattern, &Utc).unwrap(), expected, "{pattern}");
    }
}

#[test]
fn patterns_parse() {
    for format in DateFormat::ALL {
        assert_eq!(format.as_str().parse::<DateFormat>().unwrap(), format);
        assert_eq!(format.to_string(), format.as_str());
    }
    assert!("YYYY".parse::<DateFormat>().is_err());
    assert_eq!(DateFormat::parse_or("YYYY", DateFormat::MonthDay), DateFormat::MonthDay);
}

#[test]
fn unknown_pattern_uses_fallback() {
    let date = sample();
    assert_eq!(format_date_in(&date, "", &Utc).unwrap(), "2023-07-04");
    let config = FormatConfig::new().with_fallback_format(DateFormat::HourMinute);
    assert_eq!(
        format_date_with_config(&date, "dd.MM.yyyy", &Utc, &config).unwrap(),
        "09:05"
    );
}

#[test]
fn year_is_not_padded() {
    let date = Value::Date(DateRef::from_datetime(
        &Utc.with_ymd_and_hms(999, 1, 2, 0, 0, 0).unwrap(),
    ));
    assert_eq!(format_date_in(&date, "yyyy-MM-dd", &Utc).unwrap(), "999-01-02");
}

#[test]
fn offsets_apply() {
    let west = FixedOffset::west_opt(10 * 3600).unwrap();
    assert_eq!(format_date_in(&sample(), "yyyy-MM-dd HH:mm", &west).unwrap(), "2023-07-03 23:05");
}

#[test]
fn local_time_zone_formats() {
    let text = format_date(&sample(), "yyyy-MM-dd").unwrap();
    assert_eq!(text.len(), 10);
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn strings_and_numbers_become_dates() {
    assert_eq!(format_date_in(&Value::from(0), "yyyy-MM-dd", &Utc).unwrap(), "1970-01-01");
    assert_eq!(
        format_date_in(&Value::from("2023-07-04T09:05:07Z"), "HH:mm:ss", &Utc).unwrap(),
        "09:05:07"
    );
    assert_eq!(
        format_date_in(&Value::from("2023/07/04 09:05:07"), "yyyy-MM-dd HH:mm:ss", &Utc).unwrap(),
        "2023-07-04 09:05:07"
    );
    assert_eq!(format_date_in(&Value::from("2023/07/04"), "MM-dd", &Utc).unwrap(), "07-04");
}

#[test]
fn rejects_bad_dates() {
    for bad in [
        Value::Null,
        Value::Undefined,
        Value::Bool(true),
        Value::empty_array(),
        Value::from("tomorrow"),
        Value::from(f64::INFINITY),
        Value::from(9e15),
        Value::date(f64::NAN),
    ] {
        let err = format_date_in(&bad, "yyyy-MM-dd", &Utc).unwrap_err();
        assert!(err.is_invalid_input(), "{bad:?}");
    }
}

// =============================================================================
// Leap Years
// =============================================================================

#[test]
fn leap_year_rule() {
    assert!(is_leap_year(&Value::from(2000)).unwrap());
    assert!(!is_leap_year(&Value::from(1900)).unwrap());
    assert!(is_leap_year(&Value::from(2024)).unwrap());
    assert!(is_leap_year(&Value::from(" 1600 ")).unwrap());
    assert!(!is_leap_year(&Value::from(2100)).unwrap());
}

#[test]
fn leap_year_requires_numeric_input() {
    assert!(is_leap_year(&Value::Bool(true)).is_err());
    assert!(is_leap_year(&Value::empty_array()).is_err());
    assert!(is_leap_year(&Value::from("leap")).unwrap_err().is_invalid_input());
}
