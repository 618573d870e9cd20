//! Scalar typing.
//!
//! A plain scalar's text is classified into one of five kinds, in this
//! order: null, boolean, integer, real, string. Quoted and block scalars are
//! always strings; the caller decides that from the scalar style.

use std::fmt;

/// The inferred kind of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `null`, `~` or empty.
    Null,
    /// `true`/`false`/`yes`/`no`/`on`/`off`.
    Boolean,
    /// Decimal, `0x`, `0o` or `0b` integer.
    Integer,
    /// Decimal real with a fraction or exponent, or `.inf`/`.nan`.
    Real,
    /// Anything else.
    String,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Null => "null",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Real => "real",
            ScalarKind::String => "string",
        };
        f.write_str(name)
    }
}

/// Why a scalar could not be read as the requested kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceError {
    /// The text is not a literal of the requested kind.
    Mismatch {
        /// Kind the caller asked for.
        expected: ScalarKind,
        /// Kind the text classifies as.
        found: ScalarKind,
    },
    /// An integer literal that does not fit in 64 bits.
    OutOfRange,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoerceError::Mismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            CoerceError::OutOfRange => write!(f, "integer out of 64-bit range"),
        }
    }
}

impl std::error::Error for CoerceError {}

/// Classify plain scalar text.
pub fn classify(text: &str) -> ScalarKind {
    if is_null(text) {
        ScalarKind::Null
    } else if parse_bool(text).is_some() {
        ScalarKind::Boolean
    } else if is_integer(text) {
        ScalarKind::Integer
    } else if is_real(text) {
        ScalarKind::Real
    } else {
        ScalarKind::String
    }
}

/// Whether `text` is one of the null spellings.
pub fn is_null(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

/// Read a boolean literal, case-insensitively.
pub fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 3] = ["true", "yes", "on"];
    const FALSE: [&str; 3] = ["false", "no", "off"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

/// Split an optional leading sign off a literal.
fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// Split a radix prefix off an unsigned literal.
fn split_radix(digits: &str) -> (u32, &str) {
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return (radix, rest);
        }
    }
    (10, digits)
}

fn is_integer(text: &str) -> bool {
    let (_, unsigned) = split_sign(text);
    let (radix, digits) = split_radix(unsigned);
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

/// Read an integer literal.
///
/// Accepts an optional sign followed by decimal digits or a `0x`/`0o`/`0b`
/// prefixed number. Underscores are not digit separators.
pub fn parse_int(text: &str) -> Result<i64, CoerceError> {
    if !is_integer(text) {
        return Err(CoerceError::Mismatch {
            expected: ScalarKind::Integer,
            found: classify(text),
        });
    }
    let (negative, unsigned) = split_sign(text);
    let (radix, digits) = split_radix(unsigned);
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| CoerceError::OutOfRange)?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).map_err(|_| CoerceError::OutOfRange)
}

fn special_real(text: &str) -> Option<f64> {
    let (negative, unsigned) = split_sign(text);
    match unsigned {
        ".inf" | ".Inf" | ".INF" => Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        ".nan" | ".NaN" | ".NAN" if text == unsigned => Some(f64::NAN),
        _ => None,
    }
}

fn is_real(text: &str) -> bool {
    if special_real(text).is_some() {
        return true;
    }
    let (_, unsigned) = split_sign(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
        return false;
    }
    if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
        return false;
    }
    if frac_part.is_none() && exponent.is_none() {
        // plain digits are integers
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let (_, exp_digits) = split_sign(exp);
            !exp_digits.is_empty() && all_digits(exp_digits)
        }
    }
}

/// Read a real literal. Integer literals are accepted and widened.
pub fn parse_real(text: &str) -> Result<f64, CoerceError> {
    if let Some(value) = special_real(text) {
        return Ok(value);
    }
    if is_real(text) {
        return text.parse().map_err(|_| CoerceError::Mismatch {
            expected: ScalarKind::Real,
            found: ScalarKind::String,
        });
    }
    if is_integer(text) {
        return Ok(widen_int(text));
    }
    Err(CoerceError::Mismatch {
        expected: ScalarKind::Real,
        found: classify(text),
    })
}

/// Value of an integer literal as a real, whatever its magnitude.
fn widen_int(text: &str) -> f64 {
    let (negative, unsigned) = split_sign(text);
    let (radix, digits) = split_radix(unsigned);
    let magnitude = match u128::from_str_radix(digits, radix) {
        Ok(magnitude) => magnitude as f64,
        Err(_) => digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit)),
    };
    if negative { -magnitude } else { magnitude }
}

/// Whether a string scalar is nothing but ASCII digits with an optional
/// sign, and so may be read as a number on request.
pub fn is_numeric_string(text: &str) -> bool {
    let (_, digits) = split_sign(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
