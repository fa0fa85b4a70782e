//! System Chat Message (Server → Client).
//!
//! Carries a single chat component as JSON text, shown either in chat or
//! above the hotbar.

use bytes::{Buf, BufMut};

use crate::codec::{read_bool, read_string, write_bool, write_string, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

/// Maximum length of the JSON content, in bytes.
pub const MAX_CONTENT_LEN: usize = 262_144;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemChat {
    pub content: String,
    /// Show in the action bar instead of the chat window.
    pub overlay: bool,
}

impl SystemChat {
    pub fn new(content: impl Into<String>, overlay: bool) -> Self {
        Self {
            content: content.into(),
            overlay,
        }
    }
}

impl ProtoEncode for SystemChat {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.content);
        write_bool(buf, self.overlay);
    }
}

impl ProtoDecode for SystemChat {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let content = read_string(buf, MAX_CONTENT_LEN)?;
        let overlay = read_bool(buf)?;
        Ok(Self { content, overlay })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip_overlay() {
        let pkt = SystemChat::new(r#"{"text":"Saved","color":"green"}"#, true);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        let decoded = SystemChat::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn missing_overlay_flag() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "{}");
        assert!(SystemChat::proto_decode(&mut buf.freeze()).is_err());
    }
}
