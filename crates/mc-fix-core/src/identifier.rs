//! Entity UUID codec.
//!
//! Chat components seen in the wild carry a `show_entity` UUID in one of
//! four shapes: canonical text, four 32-bit ints (the NBT int-array form),
//! sixteen bytes, or an object with `most`/`least` 64-bit halves. Everything
//! decodes to [`EntityUuid`]; only canonical text is ever written back.

use std::fmt;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::UuidCodecError;

/// Field holding the most significant 64 bits in the object form.
pub const MOST_KEY: &str = "most";
/// Field holding the least significant 64 bits in the object form.
pub const LEAST_KEY: &str = "least";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityUuid(Uuid);

impl EntityUuid {
    pub fn from_u64_pair(most: u64, least: u64) -> Self {
        Self(Uuid::from_u64_pair(most, least))
    }

    pub fn most(&self) -> u64 {
        self.0.as_u64_pair().0
    }

    pub fn least(&self) -> u64 {
        self.0.as_u64_pair().1
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Decode `[a, b, c, d]` where `a:b` is the high half and `c:d` the low
    /// half. Each element is masked to its low 32 bits first, so negative
    /// ints and sign-extended longs land on the same value.
    pub fn from_int_quad(values: &[Value]) -> Result<Self, UuidCodecError> {
        let [a, b, c, d] = numeric_elements::<4>(values)?.map(|v| v as u64 & 0xFFFF_FFFF);
        Ok(Self::from_u64_pair((a << 32) | b, (c << 32) | d))
    }

    /// Decode sixteen big-endian bytes. Each element keeps only its low 8
    /// bits, so signed bytes and values past 255 are accepted.
    pub fn from_byte_sequence(values: &[Value]) -> Result<Self, UuidCodecError> {
        let bytes = numeric_elements::<16>(values)?.map(|v| v as u8);
        Ok(Self(Uuid::from_bytes(bytes)))
    }

    /// Decode `{"most": .., "least": ..}`. Other fields are ignored.
    pub fn from_halves(fields: &Map<String, Value>) -> Result<Self, UuidCodecError> {
        let most = half(fields, MOST_KEY)?;
        let least = half(fields, LEAST_KEY)?;
        Ok(Self::from_u64_pair(most as u64, least as u64))
    }
}

/// Canonical lowercase hyphenated form, e.g. `0f25d8f8-0e46-42fb-86cf-4b761cddf0aa`.
impl fmt::Display for EntityUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

fn numeric_elements<const N: usize>(values: &[Value]) -> Result<[i64; N], UuidCodecError> {
    if values.len() != N {
        return Err(UuidCodecError::WrongArity {
            expected: N,
            got: values.len(),
        });
    }
    let mut out = [0i64; N];
    for (index, (slot, value)) in out.iter_mut().zip(values).enumerate() {
        *slot = as_long(value).ok_or(UuidCodecError::NotNumeric { index })?;
    }
    Ok(out)
}

/// Read a JSON number as a 64-bit integer. Values above `i64::MAX` wrap,
/// fractions truncate toward zero.
fn as_long(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64()
        .or_else(|| n.as_u64().map(|v| v as i64))
        .or_else(|| n.as_f64().map(|v| v as i64))
}

fn half(fields: &Map<String, Value>, key: &'static str) -> Result<i64, UuidCodecError> {
    match fields.get(key) {
        None => Err(UuidCodecError::MissingField(key)),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map_err(|_| UuidCodecError::FieldNotNumeric(key)),
        Some(other) => as_long(other).ok_or(UuidCodecError::FieldNotNumeric(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn byte_values(uuid: Uuid, map: impl Fn(i64) -> i64) -> Vec<Value> {
        uuid.as_bytes()
            .iter()
            .map(|b| json!(map(*b as i8 as i64)))
            .collect()
    }

    fn int_values(uuid: Uuid) -> Vec<Value> {
        uuid.as_bytes()
            .chunks_exact(4)
            .map(|c| json!(i32::from_be_bytes([c[0], c[1], c[2], c[3]])))
            .collect()
    }

    #[test]
    fn signed_byte_sequence() {
        let expected = Uuid::parse_str("12345678-1234-5678-90ab-cdef12345678").unwrap();
        let decoded = EntityUuid::from_byte_sequence(&byte_values(expected, |v| v)).unwrap();
        assert_eq!(decoded.to_string(), "12345678-1234-5678-90ab-cdef12345678");
    }

    #[test]
    fn oversized_byte_sequence() {
        let expected = Uuid::parse_str("0f25d8f8-0e46-42fb-86cf-4b761cddf0aa").unwrap();
        let values = byte_values(expected, |v| (v & 0xFF) + 256);
        let decoded = EntityUuid::from_byte_sequence(&values).unwrap();
        assert_eq!(decoded.as_uuid(), &expected);
    }

    #[test]
    fn int_quad_with_negative_numbers() {
        let expected = Uuid::parse_str("d4f90264-12e7-4e12-9d46-9b58a3a1c0ad").unwrap();
        let values = int_values(expected);
        // Both the high words are negative as signed ints.
        assert!(values[0].as_i64().unwrap() < 0);
        assert!(values[2].as_i64().unwrap() < 0);
        let decoded = EntityUuid::from_int_quad(&values).unwrap();
        assert_eq!(decoded.to_string(), "d4f90264-12e7-4e12-9d46-9b58a3a1c0ad");
    }

    #[test]
    fn int_quad_masks_sign_extended_longs() {
        let values = vec![json!(-1i64), json!(0), json!(0xFFFF_FFFFu64), json!(1)];
        let decoded = EntityUuid::from_int_quad(&values).unwrap();
        assert_eq!(decoded.most(), 0xFFFF_FFFF_0000_0000);
        assert_eq!(decoded.least(), 0xFFFF_FFFF_0000_0001);
    }

    #[test]
    fn wrong_arity() {
        let three = vec![json!(1), json!(2), json!(3)];
        assert_eq!(
            EntityUuid::from_int_quad(&three),
            Err(UuidCodecError::WrongArity {
                expected: 4,
                got: 3
            })
        );
        let five = vec![json!(1); 5];
        assert!(EntityUuid::from_int_quad(&five).is_err());
        assert!(EntityUuid::from_byte_sequence(&five).is_err());
    }

    #[test]
    fn non_numeric_element() {
        let values = vec![json!(1), json!("2"), json!(3), json!(4)];
        assert_eq!(
            EntityUuid::from_int_quad(&values),
            Err(UuidCodecError::NotNumeric { index: 1 })
        );
        let mut bytes = vec![json!(0); 16];
        bytes[15] = Value::Null;
        assert_eq!(
            EntityUuid::from_byte_sequence(&bytes),
            Err(UuidCodecError::NotNumeric { index: 15 })
        );
    }

    #[test]
    fn halves_object() {
        let expected = Uuid::parse_str("8c2d12d7-0a8f-4e36-9c07-4f8e8d86a321").unwrap();
        let (most, least) = expected.as_u64_pair();
        let value = json!({ "most": most as i64, "least": least as i64 });
        let decoded = EntityUuid::from_halves(value.as_object().unwrap()).unwrap();
        assert_eq!(decoded.as_uuid(), &expected);
    }

    #[test]
    fn halves_accept_numeric_strings() {
        let value = json!({ "most": "-1", "least": "42" });
        let decoded = EntityUuid::from_halves(value.as_object().unwrap()).unwrap();
        assert_eq!(decoded.most(), u64::MAX);
        assert_eq!(decoded.least(), 42);
    }

    #[test]
    fn halves_failures() {
        let missing = json!({ "most": 1 });
        assert_eq!(
            EntityUuid::from_halves(missing.as_object().unwrap()),
            Err(UuidCodecError::MissingField(LEAST_KEY))
        );
        let bad = json!({ "most": true, "least": 1 });
        assert_eq!(
            EntityUuid::from_halves(bad.as_object().unwrap()),
            Err(UuidCodecError::FieldNotNumeric(MOST_KEY))
        );
    }

    #[test]
    fn canonical_text_is_lowercase_hyphenated() {
        let uuid = EntityUuid::from_u64_pair(0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210);
        assert_eq!(uuid.to_string(), "01234567-89ab-cdef-fedc-ba9876543210");
    }
}
