//! Player action (block dig) sanitization.
//!
//! [`evaluate`] is a pure decision over one packet. World state and the
//! player's position come in through two capabilities; a failing capability
//! never aborts the decision, it only falls back to the default for that
//! call site.

use mc_fix_proto::packets::PlayerActionType;
use mc_fix_proto::types::{BlockPos, ChunkPos};
use tracing::trace;

use crate::error::CapabilityError;

/// Answers whether a chunk column is loaded in the player's world.
pub trait ChunkLoadChecker {
    fn is_chunk_loaded(&self, chunk: ChunkPos) -> Result<bool, CapabilityError>;
}

impl<F> ChunkLoadChecker for F
where
    F: Fn(ChunkPos) -> Result<bool, CapabilityError>,
{
    fn is_chunk_loaded(&self, chunk: ChunkPos) -> Result<bool, CapabilityError> {
        self(chunk)
    }
}

/// Supplies the block the player currently stands in.
pub trait PositionProvider {
    /// `Ok(None)` when the position is not known.
    fn current_position(&self) -> Result<Option<BlockPos>, CapabilityError>;
}

impl<F> PositionProvider for F
where
    F: Fn() -> Result<Option<BlockPos>, CapabilityError>,
{
    fn current_position(&self) -> Result<Option<BlockPos>, CapabilityError> {
        self()
    }
}

/// What the transport layer should do with the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigDecision {
    /// Pass through unchanged.
    Allow,
    /// Drop the packet.
    Cancel,
    /// Overwrite the location field, then pass through.
    Replace(BlockPos),
}

impl DigDecision {
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }

    pub fn replacement(&self) -> Option<BlockPos> {
        match self {
            Self::Replace(pos) => Some(*pos),
            _ => None,
        }
    }
}

/// Decide how to treat a player action packet.
///
/// Only `StartDestroyBlock` can be cancelled, and only when its target chunk
/// is reported as not loaded. An origin target (all zeros) is treated as a
/// placeholder: for `StartDestroyBlock` and the item-release family it is
/// replaced by the player's current block when that can be fetched.
///
/// A capability returning `Err` never aborts the evaluation; the packet is
/// treated as if that capability were absent. Panics inside a capability
/// are not caught and propagate to the caller.
pub fn evaluate(
    action: PlayerActionType,
    position: Option<BlockPos>,
    chunks: Option<&dyn ChunkLoadChecker>,
    positions: Option<&dyn PositionProvider>,
) -> DigDecision {
    match action {
        PlayerActionType::StartDestroyBlock => start_destroy(position, chunks, positions),
        other if other.is_item_release() => item_release(position, positions),
        _ => DigDecision::Allow,
    }
}

fn start_destroy(
    position: Option<BlockPos>,
    chunks: Option<&dyn ChunkLoadChecker>,
    positions: Option<&dyn PositionProvider>,
) -> DigDecision {
    let Some(target) = position else {
        return DigDecision::Allow;
    };

    let replacement = if target.is_origin() {
        positions.and_then(fetch_position)
    } else {
        None
    };
    let effective = replacement.unwrap_or(target);
    let pass = replacement.map_or(DigDecision::Allow, DigDecision::Replace);

    let Some(chunks) = chunks else {
        return pass;
    };

    let chunk = effective.chunk_pos();
    match chunks.is_chunk_loaded(chunk) {
        Ok(true) => pass,
        Ok(false) => DigDecision::Cancel,
        Err(e) => {
            trace!(%chunk, "chunk load check failed, not cancelling: {e}");
            pass
        }
    }
}

fn item_release(
    position: Option<BlockPos>,
    positions: Option<&dyn PositionProvider>,
) -> DigDecision {
    if position.is_some_and(|pos| !pos.is_origin()) {
        return DigDecision::Allow;
    }
    positions
        .and_then(fetch_position)
        .map_or(DigDecision::Allow, DigDecision::Replace)
}

fn fetch_position(provider: &dyn PositionProvider) -> Option<BlockPos> {
    match provider.current_position() {
        Ok(pos) => pos,
        Err(e) => {
            trace!("player position lookup failed: {e}");
            None
        }
    }
}
