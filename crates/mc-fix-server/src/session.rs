//! Per-player view of world state, backing the dig sanitizer's capabilities.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use mc_fix_core::{CapabilityError, ChunkLoadChecker, PositionProvider};
use mc_fix_proto::types::{BlockPos, ChunkPos, Vec3};

/// Loaded chunk columns of one world, shared between the world loader and
/// every session in that world.
#[derive(Debug, Clone, Default)]
pub struct LoadedChunks {
    inner: Arc<RwLock<HashSet<ChunkPos>>>,
}

impl LoadedChunks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&self, chunk: ChunkPos) -> Result<(), CapabilityError> {
        self.inner
            .write()
            .map_err(|_| CapabilityError::Poisoned("loaded chunks"))?
            .insert(chunk);
        Ok(())
    }

    pub fn mark_unloaded(&self, chunk: ChunkPos) -> Result<(), CapabilityError> {
        self.inner
            .write()
            .map_err(|_| CapabilityError::Poisoned("loaded chunks"))?
            .remove(&chunk);
        Ok(())
    }
}

impl ChunkLoadChecker for LoadedChunks {
    fn is_chunk_loaded(&self, chunk: ChunkPos) -> Result<bool, CapabilityError> {
        let chunks = self
            .inner
            .read()
            .map_err(|_| CapabilityError::Poisoned("loaded chunks"))?;
        Ok(chunks.contains(&chunk))
    }
}

/// Last position reported by the player's movement packets.
#[derive(Debug, Clone, Default)]
pub struct PlayerLocation {
    inner: Arc<RwLock<Option<Vec3>>>,
}

impl PlayerLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, position: Vec3) -> Result<(), CapabilityError> {
        *self
            .inner
            .write()
            .map_err(|_| CapabilityError::Poisoned("player location"))? = Some(position);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CapabilityError> {
        *self
            .inner
            .write()
            .map_err(|_| CapabilityError::Poisoned("player location"))? = None;
        Ok(())
    }
}

impl PositionProvider for PlayerLocation {
    fn current_position(&self) -> Result<Option<BlockPos>, CapabilityError> {
        let position = *self
            .inner
            .read()
            .map_err(|_| CapabilityError::Poisoned("player location"))?;
        match position {
            None => Ok(None),
            Some(v) if !v.is_finite() => Err(CapabilityError::InvalidPosition(v.to_string())),
            Some(v) => Ok(Some(BlockPos::from_vec3(&v))),
        }
    }
}

/// A connected player as seen by the packet filter.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub name: String,
    /// `None` while the player is between worlds.
    pub world: Option<LoadedChunks>,
    pub location: PlayerLocation,
}

impl PlayerSession {
    pub fn new(name: impl Into<String>, world: Option<LoadedChunks>) -> Self {
        Self {
            name: name.into(),
            world,
            location: PlayerLocation::new(),
        }
    }

    pub fn chunk_checker(&self) -> Option<&dyn ChunkLoadChecker> {
        self.world.as_ref().map(|w| w as &dyn ChunkLoadChecker)
    }

    pub fn position_provider(&self) -> &dyn PositionProvider {
        &self.location
    }
}
