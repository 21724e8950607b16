//! Number formatting: percentages, fixed decimals, thousands separators.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tidbit_foundation::conversions::{number_to_string, to_fixed, to_number};
use tidbit_foundation::{Error, ErrorContext, Result, TypeTag, Value};
use tracing::warn;

use crate::config::{DEFAULT_PRECISION, FormatConfig};

lazy_static! {
    /// A digit run at the start of the text or right after whitespace.
    static ref LEADING_DIGITS: Regex = Regex::new(r"(^|\s)(\d+)").unwrap();
}

fn in_operation(operation: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| err.with_context(ErrorContext::new().with_operation(operation))
}

/// Coerces `val` and `bit`, rejecting booleans and anything that is NaN.
/// An undefined `bit` means [`DEFAULT_PRECISION`].
fn checked_operands(val: &Value, bit: &Value) -> Result<(f64, f64)> {
    if let Value::Bool(_) = val {
        return Err(Error::type_mismatch("number or numeric string", TypeTag::Boolean));
    }
    let num = to_number(val);
    if num.is_nan() {
        return Err(Error::invalid_input(format!("val is not a number: {val}")));
    }
    let digits = match bit {
        Value::Undefined => f64::from(DEFAULT_PRECISION),
        other => to_number(other),
    };
    if digits.is_nan() {
        return Err(Error::invalid_input(format!("bit must be a number, got {bit}")));
    }
    Ok((num, digits))
}

/// Renders `val` as a percentage with two fraction digits: `0.1234` is `"12.34%"`.
///
/// # Errors
///
/// Fails if `val` is a boolean or does not coerce to a number.
pub fn to_percent(val: &Value) -> Result<String> {
    to_percent_with_config(val, &FormatConfig::default())
}

/// Renders `val` as a percentage using the configured precision.
///
/// # Errors
///
/// Same as [`to_percent`].
pub fn to_percent_with_config(val: &Value, config: &FormatConfig) -> Result<String> {
    to_percent_with(val, &Value::from(u32::from(config.precision)))
}

/// Renders `val` as a percentage with `bit` fraction digits. An undefined
/// `bit` uses the default of two digits.
///
/// # Errors
///
/// Fails if `val` is a boolean or not numeric, if `bit` is not numeric, or if
/// `bit` is outside `0..=100`.
pub fn to_percent_with(val: &Value, bit: &Value) -> Result<String> {
    let (num, digits) = checked_operands(val, bit).map_err(in_operation("to_percent"))?;
    let fixed = to_fixed(num * 100.0, digits).map_err(in_operation("to_percent"))?;
    Ok(format!("{fixed}%"))
}

/// Renders `val` with two fraction digits.
///
/// # Errors
///
/// Fails if `val` is a boolean or does not coerce to a number.
pub fn to_decimal(val: &Value) -> Result<String> {
    to_decimal_with_config(val, &FormatConfig::default())
}

/// Renders `val` using the configured precision.
///
/// # Errors
///
/// Same as [`to_decimal`].
pub fn to_decimal_with_config(val: &Value, config: &FormatConfig) -> Result<String> {
    to_decimal_with(val, &Value::from(u32::from(config.precision)))
}

/// Renders `val` with `bit` fraction digits. An undefined `bit` uses the
/// default of two digits.
///
/// # Errors
///
/// Fails if `val` is a boolean or not numeric, if `bit` is not numeric, or if
/// `bit` is outside `0..=100`.
pub fn to_decimal_with(val: &Value, bit: &Value) -> Result<String> {
    let (num, digits) = checked_operands(val, bit).map_err(in_operation("to_decimal"))?;
    to_fixed(num, digits).map_err(in_operation("to_decimal"))
}

/// Inserts `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn coerce_for_grouping(num: &Value) -> Result<f64> {
    match num.type_tag() {
        TypeTag::String | TypeTag::Number => Ok(to_number(num)),
        other => Err(Error::type_mismatch("number or numeric string", other)),
    }
}

fn grouped(n: f64) -> String {
    let text = number_to_string(n);
    LEADING_DIGITS
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("{}{}", &caps[1], group_thousands(&caps[2]))
        })
        .into_owned()
}

/// Groups the integer digits of a number with `,`: `1234567.891` is
/// `"1,234,567.891"`.
///
/// The value is first rendered in shortest form, and only a digit run at the
/// very start is grouped. A leading minus sign therefore leaves the digits
/// ungrouped, and exponent forms keep their mantissa as is.
///
/// # Errors
///
/// Fails if `num` is neither a number nor a string, or does not coerce to a
/// number.
pub fn mili_format(num: &Value) -> Result<String> {
    let n = coerce_for_grouping(num).map_err(in_operation("mili_format"))?;
    if n.is_nan() {
        return Err(Error::invalid_input(format!("val is not a number: {num}"))
            .with_context(ErrorContext::new().with_operation("mili_format")));
    }
    Ok(grouped(n))
}

/// Like [`mili_format`], but hands back the input unchanged, with a warning,
/// when it does not coerce to a number.
///
/// # Errors
///
/// Fails only if `num` is neither a number nor a string.
pub fn mili_format_lossy(num: &Value) -> Result<Value> {
    let n = coerce_for_grouping(num).map_err(in_operation("mili_format"))?;
    if n.is_nan() {
        warn!(value = %num, "mili_format: value is not a number, returning it unchanged");
        return Ok(num.clone());
    }
    Ok(Value::from(grouped(n)))
}
