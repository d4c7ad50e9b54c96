//! Lenient decoders for the protobuf JSON forms of integer and enum fields.
//!
//! Cosmos clients write 64-bit integers as JSON strings (`"proposal_id": "7"`)
//! and enums by variant name (`"PROPOSAL_STATUS_PASSED"`). Both decoders below
//! also accept the plain JSON number. Encoding is left to the derived impls.
//!
//! ```ignore
//! #[serde(deserialize_with = "crate::json::uint64")]
//! pub proposal_id: u64,
//! ```

use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Decode a `u64` from a JSON number or a decimal string.
///
/// # Errors
///
/// Fails on negative or out-of-range numbers and on non-decimal strings.
pub fn uint64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(IntVisitor::<u64>::new("a u64 as a number or decimal string"))
}

/// Decode an `i64` from a JSON number or a decimal string.
///
/// # Errors
///
/// Fails on out-of-range numbers and on non-decimal strings.
pub fn int64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(IntVisitor::<i64>::new("an i64 as a number or decimal string"))
}

/// Decode an enum number from a variant name or a JSON number.
///
/// Numbers outside `variants` are kept as-is, like unknown enum values on the
/// wire. Names must be listed in `variants`.
///
/// # Errors
///
/// Fails on unknown names and on numbers outside the `i32` range.
pub fn enumeration<'de, D: Deserializer<'de>>(
    deserializer: D,
    variants: &'static [(&'static str, i32)],
) -> Result<i32, D::Error> {
    deserializer.deserialize_any(EnumVisitor { variants })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Visitors
// ═══════════════════════════════════════════════════════════════════════════════

struct IntVisitor<T> {
    expecting: &'static str,
    _int: PhantomData<T>,
}

impl<T> IntVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            _int: PhantomData,
        }
    }
}

impl<'de, T> Visitor<'de> for IntVisitor<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

struct EnumVisitor {
    variants: &'static [(&'static str, i32)],
}

impl<'de> Visitor<'de> for EnumVisitor {
    type Value = i32;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an enum variant name or number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
        self.variants
            .iter()
            .find(|(name, _)| *name == v)
            .map(|(_, number)| *number)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const COLOR: &[(&str, i32)] = &[("COLOR_UNSPECIFIED", 0), ("COLOR_RED", 1)];

    fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        enumeration(deserializer, COLOR)
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "uint64")]
        id: u64,
        #[serde(deserialize_with = "int64")]
        height: i64,
        #[serde(deserialize_with = "color")]
        color: i32,
    }

    fn decode(json: &str) -> Result<Sample, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn integers_accept_numbers_and_strings() {
        let sample = decode(r#"{"id": "18446744073709551615", "height": "-5"}"#).unwrap();
        assert_eq!(sample.id, u64::MAX);
        assert_eq!(sample.height, -5);

        let sample = decode(r#"{"id": 7, "height": -5}"#).unwrap();
        assert_eq!(sample.id, 7);
        assert_eq!(sample.height, -5);
    }

    #[test]
    fn integers_reject_bad_values() {
        assert!(decode(r#"{"id": "seven"}"#).is_err());
        assert!(decode(r#"{"id": -1}"#).is_err());
        assert!(decode(r#"{"id": "-1"}"#).is_err());
        assert!(decode(r#"{"id": 1.5}"#).is_err());
        assert!(decode(r#"{"height": "9223372036854775808"}"#).is_err());
        assert!(decode(r#"{"height": true}"#).is_err());
    }

    #[test]
    fn enums_accept_names_and_numbers() {
        assert_eq!(decode(r#"{"color": "COLOR_RED"}"#).unwrap().color, 1);
        assert_eq!(decode(r#"{"color": 1}"#).unwrap().color, 1);
        assert_eq!(decode(r#"{"color": 9}"#).unwrap().color, 9);
        assert_eq!(decode("{}").unwrap(), Sample::default());
    }

    #[test]
    fn enums_reject_unknown_names() {
        let err = decode(r#"{"color": "COLOR_BLUE"}"#).unwrap_err();
        assert!(err.to_string().contains("COLOR_BLUE"), "{err}");
        assert!(decode(r#"{"color": 4294967296}"#).is_err());
    }
}
