//! Minecraft Java Edition play-state types for the packets the fix layer touches.
//!
//! Only the shapes needed at the transport boundary live here: the serverbound
//! player action (digging) packet and the clientbound packets that carry
//! chat-component JSON.

pub mod codec;
pub mod error;
pub mod packets;
pub mod types;
