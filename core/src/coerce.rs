//! Weak scalar coercion for path parameters.
//!
//! Path parameters are always strings. These parsers turn them into the
//! scalar kinds a request field can declare, leniently:
//!
//! | Kind | Accepted input | Empty string |
//! |------|----------------|--------------|
//! | bool | `1 t T true TRUE True` / `0 f F false FALSE False` | `false` |
//! | integers | optional sign, decimal or `0x` / `0o` / `0b` prefixed | `0` |
//! | floats | anything `str::parse` accepts | `0.0` |
//! | enums | a declared variant name or an integer | `0` |
//!
//! Out-of-range integers and unparsable input are errors, never silently clamped.

use crate::CoerceError;

pub(crate) fn parse_bool(field: &str, raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        _ => Err(invalid(field, raw, "bool")),
    }
}

pub(crate) fn parse_i32(field: &str, raw: &str) -> Result<i32, CoerceError> {
    parse_integer(raw)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| invalid(field, raw, "int32"))
}

pub(crate) fn parse_i64(field: &str, raw: &str) -> Result<i64, CoerceError> {
    parse_integer(raw)
        .and_then(|v| i64::try_from(v).ok())
        .ok_or_else(|| invalid(field, raw, "int64"))
}

pub(crate) fn parse_u32(field: &str, raw: &str) -> Result<u32, CoerceError> {
    parse_integer(raw)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid(field, raw, "uint32"))
}

pub(crate) fn parse_u64(field: &str, raw: &str) -> Result<u64, CoerceError> {
    parse_integer(raw)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| invalid(field, raw, "uint64"))
}

pub(crate) fn parse_f32(field: &str, raw: &str) -> Result<f32, CoerceError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(|_| invalid(field, raw, "float"))
}

pub(crate) fn parse_f64(field: &str, raw: &str) -> Result<f64, CoerceError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(|_| invalid(field, raw, "double"))
}

pub(crate) fn parse_enum(
    field: &str,
    raw: &str,
    values: &[(&'static str, i32)],
) -> Result<i32, CoerceError> {
    if let Some(&(_, number)) = values.iter().find(|(name, _)| *name == raw) {
        return Ok(number);
    }
    parse_i32(field, raw).map_err(|_| invalid(field, raw, "enum"))
}

/// Parse a signed integer with optional radix prefix.
///
/// `i128` covers the full `i64` and `u64` ranges, so the caller narrows once.
fn parse_integer(raw: &str) -> Option<i128> {
    if raw.is_empty() {
        return Some(0);
    }

    let (negative, unsigned) = match raw.as_bytes()[0] {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits) = split_radix(unsigned);
    // from_str_radix would accept a second sign
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn split_radix(s: &str) -> (u32, &str) {
    let prefix = s.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0b") => (2, &s[2..]),
        _ => (10, s),
    }
}

fn invalid(field: &str, raw: &str, kind: &'static str) -> CoerceError {
    CoerceError::InvalidValue {
        field: field.to_owned(),
        value: raw.to_owned(),
        kind,
    }
}
