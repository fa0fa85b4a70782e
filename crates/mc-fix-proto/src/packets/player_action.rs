//! Player Action (Client → Server).
//!
//! Sent when the player starts, cancels or finishes digging a block, and
//! reused for item drops, releasing a used item and swapping hands.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{BlockPos, VarInt};

/// Digging status carried by the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerActionType {
    StartDestroyBlock,
    AbortDestroyBlock,
    StopDestroyBlock,
    DropAllItems,
    DropItem,
    ReleaseUseItem,
    SwapItemWithOffhand,
    /// Any status value this version does not define.
    Other(i32),
}

impl PlayerActionType {
    pub fn from_i32(v: i32) -> Self {
        match v {
            0 => Self::StartDestroyBlock,
            1 => Self::AbortDestroyBlock,
            2 => Self::StopDestroyBlock,
            3 => Self::DropAllItems,
            4 => Self::DropItem,
            5 => Self::ReleaseUseItem,
            6 => Self::SwapItemWithOffhand,
            other => Self::Other(other),
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Self::StartDestroyBlock => 0,
            Self::AbortDestroyBlock => 1,
            Self::StopDestroyBlock => 2,
            Self::DropAllItems => 3,
            Self::DropItem => 4,
            Self::ReleaseUseItem => 5,
            Self::SwapItemWithOffhand => 6,
            Self::Other(v) => v,
        }
    }

    /// Item-drop family: the location field is meaningless to the client
    /// and usually sent as the origin.
    pub fn is_item_release(self) -> bool {
        matches!(
            self,
            Self::DropItem | Self::DropAllItems | Self::ReleaseUseItem
        )
    }
}

/// Player Action packet fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub action: PlayerActionType,
    pub location: BlockPos,
    pub face: u8,
    pub sequence: i32,
}

impl ProtoEncode for PlayerAction {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.action.to_i32()).proto_encode(buf);
        self.location.proto_encode(buf);
        buf.put_u8(self.face);
        VarInt(self.sequence).proto_encode(buf);
    }
}

impl ProtoDecode for PlayerAction {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let action = PlayerActionType::from_i32(VarInt::proto_decode(buf)?.0);
        let location = BlockPos::proto_decode(buf)?;
        ensure_remaining(&*buf, 1)?;
        let face = buf.get_u8();
        let sequence = VarInt::proto_decode(buf)?.0;

        Ok(Self {
            action,
            location,
            face,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use std::io::Cursor;

    fn encode_action(action: i32, pos: BlockPos) -> BytesMut {
        let mut buf = BytesMut::new();
        VarInt(action).proto_encode(&mut buf);
        pos.proto_encode(&mut buf);
        buf.put_u8(1); // face
        VarInt(7).proto_encode(&mut buf); // sequence
        buf
    }

    #[test]
    fn decode_start_destroy() {
        let data = encode_action(0, BlockPos::new(32, 70, -48));
        let mut cursor = Cursor::new(&data[..]);
        let pkt = PlayerAction::proto_decode(&mut cursor).unwrap();
        assert_eq!(pkt.action, PlayerActionType::StartDestroyBlock);
        assert_eq!(pkt.location, BlockPos::new(32, 70, -48));
        assert_eq!(pkt.face, 1);
        assert_eq!(pkt.sequence, 7);
    }

    #[test]
    fn decode_drop_item_at_origin() {
        let data = encode_action(4, BlockPos::ORIGIN);
        let pkt = PlayerAction::proto_decode(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(pkt.action, PlayerActionType::DropItem);
        assert!(pkt.location.is_origin());
    }

    #[test]
    fn decode_unknown_action() {
        let data = encode_action(99, BlockPos::ORIGIN);
        let pkt = PlayerAction::proto_decode(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(pkt.action, PlayerActionType::Other(99));
    }

    #[test]
    fn encode_matches_decode() {
        let pkt = PlayerAction {
            action: PlayerActionType::ReleaseUseItem,
            location: BlockPos::new(-5, 12, 900),
            face: 255,
            sequence: 1000,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        let decoded = PlayerAction::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn item_release_family() {
        assert!(PlayerActionType::DropItem.is_item_release());
        assert!(PlayerActionType::DropAllItems.is_item_release());
        assert!(PlayerActionType::ReleaseUseItem.is_item_release());
        assert!(!PlayerActionType::StartDestroyBlock.is_item_release());
        assert!(!PlayerActionType::SwapItemWithOffhand.is_item_release());
    }

    #[test]
    fn decode_buffer_too_short() {
        let data = [0x00, 0x01]; // status + partial position
        let mut cursor = Cursor::new(&data[..]);
        assert!(PlayerAction::proto_decode(&mut cursor).is_err());
    }
}
