//! Packet repair core.
//!
//! Two independent, pure subsystems:
//! - [`hover`]: rewrites legacy entity UUID encodings inside `show_entity`
//!   hover events of chat-component JSON to canonical text.
//! - [`dig`]: decides whether a player action packet passes, is dropped, or
//!   gets its block position replaced.
//!
//! Neither subsystem keeps state between calls or lets malformed input or a
//! failing capability abort the caller.

pub mod dig;
pub mod error;
pub mod hover;
pub mod identifier;
pub mod walker;

pub use dig::{evaluate, ChunkLoadChecker, DigDecision, PositionProvider};
pub use error::{CapabilityError, UuidCodecError};
pub use hover::{normalize, NormalizationOptions, NormalizationRecord, RecordSink};
pub use identifier::EntityUuid;
