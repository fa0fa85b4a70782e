//! Set Tab List Header And Footer (Server → Client).

use bytes::{Buf, BufMut};

use crate::codec::{read_string, write_string, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::packets::system_chat::MAX_CONTENT_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabListHeaderFooter {
    pub header: String,
    pub footer: String,
}

impl ProtoEncode for TabListHeaderFooter {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.header);
        write_string(buf, &self.footer);
    }
}

impl ProtoDecode for TabListHeaderFooter {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let header = read_string(buf, MAX_CONTENT_LEN)?;
        let footer = read_string(buf, MAX_CONTENT_LEN)?;
        Ok(Self { header, footer })
    }
}
