//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut};

use crate::error::ProtoError;
use crate::types::VarInt;

/// Default upper bound for protocol strings, in bytes.
pub const MAX_STRING_LEN: usize = 32767 * 4;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Write a protocol string (VarInt byte length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarInt(s.len() as i32).proto_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a protocol string of at most `max_len` bytes.
pub fn read_string(buf: &mut impl Buf, max_len: usize) -> Result<String, ProtoError> {
    let raw_len = VarInt::proto_decode(buf)?.0;
    if raw_len < 0 {
        return Err(ProtoError::InvalidData(format!(
            "negative string length: {raw_len}"
        )));
    }
    let len = raw_len as usize;
    if len > max_len {
        return Err(ProtoError::StringTooLong { len, max: max_len });
    }
    ensure_remaining(&*buf, len)?;
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| ProtoError::InvalidUtf8)
}

pub fn write_bool(buf: &mut impl BufMut, value: bool) {
    buf.put_u8(value as u8);
}

pub fn read_bool(buf: &mut impl Buf) -> Result<bool, ProtoError> {
    ensure_remaining(&*buf, 1)?;
    match buf.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ProtoError::InvalidData(format!("invalid boolean byte: {other}"))),
    }
}

pub(crate) fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn string_roundtrip() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, r#"{"text":"hi"}"#);
        let result = read_string(&mut buf.freeze(), MAX_STRING_LEN).unwrap();
        assert_eq!(result, r#"{"text":"hi"}"#);
    }

    #[test]
    fn string_unicode() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "日本語テスト");
        let result = read_string(&mut buf.freeze(), MAX_STRING_LEN).unwrap();
        assert_eq!(result, "日本語テスト");
    }

    #[test]
    fn string_over_limit() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "abcdef");
        let err = read_string(&mut buf.freeze(), 4).unwrap_err();
        assert!(matches!(err, ProtoError::StringTooLong { len: 6, max: 4 }));
    }

    #[test]
    fn string_buffer_too_short() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello");
        let truncated = buf.freeze().slice(..3);
        assert!(read_string(&mut truncated.clone(), MAX_STRING_LEN).is_err());
    }

    #[test]
    fn string_negative_length() {
        let mut buf = BytesMut::new();
        VarInt(-1).proto_encode(&mut buf);
        assert!(matches!(
            read_string(&mut buf.freeze(), MAX_STRING_LEN),
            Err(ProtoError::InvalidData(_))
        ));
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let data = [2u8];
        assert!(read_bool(&mut &data[..]).is_err());
        assert!(read_bool(&mut &[1u8][..]).unwrap());
    }
}
