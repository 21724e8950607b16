//! Numeric coercion and rendering.
//!
//! - [`to_number`] coerces any value to a double (NaN when it has no numeric reading)
//! - [`number_to_string`] renders a double in shortest round-trip form
//! - [`to_fixed`] renders a double with a fixed number of fraction digits

use crate::error::Error;
use crate::value::Value;
use crate::Result;

/// Largest fraction digit count accepted by [`to_fixed`].
pub const MAX_FRACTION_DIGITS: f64 = 100.0;

/// Magnitude at which [`to_fixed`] switches to [`number_to_string`].
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Coerces a value to a number.
///
/// `undefined` is NaN, `null` is 0, booleans are 0 or 1, strings are parsed
/// with [`string_to_number`], dates yield their time value, and arrays go
/// through their joined string form. Other handles are NaN.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Date(d) => d.time_value(),
        Value::Array(_) => string_to_number(&value.to_string()),
        Value::Object(_) | Value::RegExp(_) | Value::Set(_) | Value::Map(_) | Value::Function(_) => {
            f64::NAN
        }
    }
}

/// Parses a numeric string literal.
///
/// Surrounding whitespace is ignored and the empty string is 0. Accepts
/// decimal literals with optional sign, fraction and exponent, `Infinity`,
/// and unsigned `0x`/`0o`/`0b` integers. Anything else is NaN.
#[must_use]
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&trimmed[2..], radix);
    }

    let is_decimal_char = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-');
    if !trimmed.chars().all(is_decimal_char) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    acc
}

/// Renders a number in shortest round-trip decimal form.
///
/// Integers below 1e21 print without exponent, magnitudes in `[1e-6, 1e21)`
/// print in plain decimal, everything else uses `d.ddde±n`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    // shortest digits d1..dk and exponent such that n = 0.d1..dk * 10^point
    let sci = format!("{n:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i64;
    let point = exponent.parse::<i64>().unwrap_or(0) + 1;

    if k <= point && point <= 21 {
        let zeros = usize::try_from(point - k).unwrap_or(0);
        format!("{digits}{}", "0".repeat(zeros))
    } else if 0 < point && point <= 21 {
        let split = usize::try_from(point).unwrap_or(0);
        format!("{}.{}", &digits[..split], &digits[split..])
    } else if -6 < point && point <= 0 {
        let zeros = usize::try_from(-point).unwrap_or(0);
        format!("0.{}{digits}", "0".repeat(zeros))
    } else {
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// Renders `n` with exactly `fraction_digits` digits after the point.
///
/// `fraction_digits` is truncated toward zero (NaN counts as 0). The rounding
/// picks the nearest representable decimal on the exact binary value of `n`;
/// exact ties round away from zero, so `to_fixed(2.5, 0.0)` is `"3"` while
/// `to_fixed(1.005, 2.0)` is `"1.00"`. Non-finite values and magnitudes of at
/// least 1e21 render via [`number_to_string`].
///
/// # Errors
///
/// Returns `InvalidInput` if the digit count is outside `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_fixed(n: f64, fraction_digits: f64) -> Result<String> {
    let digits = if fraction_digits.is_nan() {
        0.0
    } else {
        fraction_digits.trunc()
    };
    if !(0.0..=MAX_FRACTION_DIGITS).contains(&digits) {
        return Err(Error::invalid_input(format!(
            "fraction digits must be between 0 and 100, got {}",
            number_to_string(fraction_digits)
        )));
    }
    let digits = digits as usize;

    if !n.is_finite() || n.abs() >= FIXED_NOTATION_LIMIT {
        return Ok(number_to_string(n));
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let magnitude = n.abs();
    let body = if exact_fraction_digits(magnitude) == digits + 1 {
        // exact tie: the dropped digit is a final 5
        let mut exact = format!("{magnitude:.prec$}", prec = digits + 1);
        exact.pop();
        if exact.ends_with('.') {
            exact.pop();
        }
        increment_decimal(&exact)
    } else {
        format!("{magnitude:.digits$}")
    };
    Ok(format!("{sign}{body}"))
}

/// Number of fraction digits in the exact decimal expansion of `n`.
#[allow(clippy::cast_possible_wrap)]
fn exact_fraction_digits(n: f64) -> usize {
    let bits = n.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i64;
    let mut mantissa = bits & 0x000f_ffff_ffff_ffff;
    let mut exponent = if exponent_bits == 0 {
        -1074
    } else {
        mantissa |= 1 << 52;
        exponent_bits - 1075
    };
    if mantissa == 0 {
        return 0;
    }
    exponent += i64::from(mantissa.trailing_zeros());
    usize::try_from(-exponent).unwrap_or(0)
}

/// Adds one unit in the last place to a non-negative decimal string.
fn increment_decimal(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *byte {
            b'.' => {}
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                carry = false;
            }
        }
    }
    let mut out = String::from_utf8(bytes).unwrap_or_default();
    if carry {
        out.insert(0, '1');
    }
    out
}
