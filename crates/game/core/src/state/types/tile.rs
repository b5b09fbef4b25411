use super::{Position, TileId};
use crate::error::{ErrorSeverity, GameError};

/// A numbered tile occupying one board cell.
///
/// The merge flag is plain per-turn state: it is raised on the tile produced
/// by a merge and cleared for every tile before the next move starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    id: TileId,
    value: u32,
    merged_this_round: bool,
}

impl Tile {
    /// Largest value a tile can hold. Tiles at this value never merge.
    pub const MAX_VALUE: u32 = 1 << 31;

    /// Creates a fresh tile.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidValue`] unless `value` is a power of two of at least 2.
    pub fn new(id: TileId, value: u32) -> Result<Self, TileError> {
        if value < 2 || !value.is_power_of_two() {
            return Err(TileError::InvalidValue(value));
        }
        Ok(Self {
            id,
            value,
            merged_this_round: false,
        })
    }

    /// Builds the tile that replaces two equal tiles after a merge.
    ///
    /// The caller guarantees the sources had equal power-of-two values; the
    /// result keeps that invariant.
    pub(crate) fn merged(id: TileId, source_value: u32) -> Self {
        Self {
            id,
            value: source_value * 2,
            merged_this_round: true,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn merged_this_round(&self) -> bool {
        self.merged_this_round
    }

    /// Returns true if this tile may absorb `other` in the current move.
    ///
    /// Tiles at [`Self::MAX_VALUE`] stay put, since their sum would not fit.
    pub fn can_merge_with(&self, other: &Tile) -> bool {
        self.value == other.value
            && self.value < Self::MAX_VALUE
            && !self.merged_this_round
            && !other.merged_this_round
    }

    pub(crate) fn clear_merge_flag(&mut self) {
        self.merged_this_round = false;
    }

    /// Read-only projection of this tile at `position`.
    pub fn view(&self, position: Position) -> TileView {
        TileView {
            id: self.id,
            position,
            value: self.value,
            merged_this_round: self.merged_this_round,
        }
    }
}

/// Snapshot of a tile as seen by a presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileView {
    pub id: TileId,
    pub position: Position,
    pub value: u32,
    pub merged_this_round: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileError {
    #[error("tile value {0} is not a power of two of at least 2")]
    InvalidValue(u32),
}

impl GameError for TileError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidValue(_) => "TILE_INVALID_VALUE",
        }
    }
}
