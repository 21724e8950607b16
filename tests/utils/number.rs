//! Integration tests for number formatting
//!
//! Tests percentages, fixed decimals, and thousands grouping.

use proptest::prelude::*;
use tidbit_foundation::conversions::{number_to_string, to_fixed};
use tidbit_foundation::{ErrorKind, Value};
use tidbit_utils::{
    FormatConfig, mili_format, mili_format_lossy, to_decimal, to_decimal_with,
    to_decimal_with_config, to_percent, to_percent_with,
};

// =============================================================================
// Fixed-Point Rendering
// =============================================================================

#[test]
fn fixed_rounds_ties_away_from_zero() {
    assert_eq!(to_fixed(2.5, 0.0).unwrap(), "3");
    assert_eq!(to_fixed(-2.5, 0.0).unwrap(), "-3");
    assert_eq!(to_fixed(0.5, 0.0).unwrap(), "1");
}

#[test]
fn fixed_uses_exact_binary_value() {
    assert_eq!(to_fixed(1.005, 2.0).unwrap(), "1.00");
    assert_eq!(to_fixed(1.125, 2.0).unwrap(), "1.13");
}

#[test]
fn fixed_large_and_special_values() {
    assert_eq!(to_fixed(1e21, 2.0).unwrap(), "1e+21");
    assert_eq!(to_fixed(f64::NAN, 2.0).unwrap(), "NaN");
    assert_eq!(to_fixed(f64::INFINITY, 1.0).unwrap(), "Infinity");
    assert!(to_fixed(1.0, 101.0).is_err());
    assert!(to_fixed(1.0, -1.0).is_err());
}

#[test]
fn number_strings() {
    assert_eq!(number_to_string(1e21), "1e+21");
    assert_eq!(number_to_string(1e-7), "1e-7");
    assert_eq!(number_to_string(123.456), "123.456");
    assert_eq!(number_to_string(-0.0), "0");
}

// =============================================================================
// Percent and Decimal
// =============================================================================

#[test]
fn percent() {
    assert_eq!(to_percent(&Value::from(0.1234)).unwrap(), "12.34%");
    assert_eq!(to_percent(&Value::from(" 0.5 ")).unwrap(), "50.00%");
    assert_eq!(to_percent(&Value::from("")).unwrap(), "0.00%");
    assert_eq!(to_percent_with(&Value::from(1), &Value::from(1)).unwrap(), "100.0%");
}

#[test]
fn undefined_bit_falls_back_to_two_digits() {
    assert_eq!(to_percent_with(&Value::from(0.5), &Value::Undefined).unwrap(), "50.00%");
    assert_eq!(to_decimal_with(&Value::from(3), &Value::Undefined).unwrap(), "3.00");
}

#[test]
fn percent_rejects_booleans_and_nan() {
    let err = to_percent(&Value::Bool(false)).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(to_percent(&Value::from("twelve")).unwrap_err().is_invalid_input());
    assert!(to_percent(&Value::empty_object()).unwrap_err().is_invalid_input());
}

#[test]
fn decimal() {
    assert_eq!(to_decimal(&Value::from(1)).unwrap(), "1.00");
    assert_eq!(to_decimal(&Value::from("0x10")).unwrap(), "16.00");
    assert_eq!(to_decimal(&Value::empty_array()).unwrap(), "0.00");
    assert_eq!(to_decimal_with(&Value::from(12.5), &Value::from("0")).unwrap(), "13");
    let config = FormatConfig::new().with_precision(3);
    assert_eq!(to_decimal_with_config(&Value::from(1.5), &config).unwrap(), "1.500");
}

#[test]
fn decimal_truncates_fractional_bit() {
    assert_eq!(to_decimal_with(&Value::from(1.25), &Value::from(1.9)).unwrap(), "1.3");
}

// =============================================================================
// Thousands Grouping
// =============================================================================

#[test]
fn mili_format_groups_integer_part() {
    assert_eq!(mili_format(&Value::from(1_234_567.891)).unwrap(), "1,234,567.891");
    assert_eq!(mili_format(&Value::from(1000)).unwrap(), "1,000");
    assert_eq!(mili_format(&Value::from(0.5)).unwrap(), "0.5");
    assert_eq!(mili_format(&Value::from(" 123456 ")).unwrap(), "123,456");
}

#[test]
fn mili_format_policy() {
    assert!(mili_format(&Value::from("n/a")).unwrap_err().is_invalid_input());
    assert_eq!(mili_format_lossy(&Value::from("n/a")).unwrap(), Value::from("n/a"));
    assert!(mili_format(&Value::empty_array()).is_err());
    assert!(mili_format_lossy(&Value::empty_array()).is_err());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn undefined_bit_matches_default(n in -1.0e9f64..1.0e9) {
        let v = Value::from(n);
        prop_assert_eq!(to_decimal_with(&v, &Value::Undefined).unwrap(), to_decimal(&v).unwrap());
        prop_assert_eq!(to_percent_with(&v, &Value::Undefined).unwrap(), to_percent(&v).unwrap());
    }

    #[test]
    fn grouping_only_adds_commas(n in 0u32..u32::MAX) {
        let plain = number_to_string(f64::from(n));
        let grouped = mili_format(&Value::from(n)).unwrap();
        prop_assert_eq!(grouped.replace(',', ""), plain);
    }
}
