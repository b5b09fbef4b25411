//! Per-tile effects of a move.
//!
//! The engine reports what happened to each tile rather than a full before
//! and after board, so a presentation layer can animate slides, pop merged
//! tiles and fade in spawns without diffing grids itself.

use crate::state::{Position, TileId, TileView};

/// One tile-level effect produced by a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileChange {
    /// A tile slid to a new cell without changing value.
    Moved {
        id: TileId,
        from: Position,
        to: Position,
        value: u32,
    },

    /// Two equal tiles were destroyed and replaced by a new tile of double value.
    ///
    /// `sources[i]` started the move at `origins[i]`; index 0 is the tile
    /// nearer the edge the board moved toward.
    Merged {
        id: TileId,
        position: Position,
        value: u32,
        sources: [TileId; 2],
        origins: [Position; 2],
    },

    /// A new tile was placed on an empty cell.
    Spawned {
        id: TileId,
        position: Position,
        value: u32,
    },
}

impl TileChange {
    /// Identity of the tile present after the change.
    pub fn id(&self) -> TileId {
        match *self {
            Self::Moved { id, .. } | Self::Merged { id, .. } | Self::Spawned { id, .. } => id,
        }
    }

    /// Cell the tile occupies after the change.
    pub fn position(&self) -> Position {
        match *self {
            Self::Moved { to, .. } => to,
            Self::Merged { position, .. } | Self::Spawned { position, .. } => position,
        }
    }

    pub fn value(&self) -> u32 {
        match *self {
            Self::Moved { value, .. } | Self::Merged { value, .. } | Self::Spawned { value, .. } => {
                value
            }
        }
    }

    /// Returns true if the displayed numeral at [`Self::position`] must be redrawn.
    pub fn changes_value(&self) -> bool {
        matches!(self, Self::Merged { .. } | Self::Spawned { .. })
    }

    /// Tiles that no longer exist because of this change.
    pub fn removed(&self) -> &[TileId] {
        match self {
            Self::Merged { sources, .. } => sources.as_slice(),
            Self::Moved { .. } | Self::Spawned { .. } => &[],
        }
    }

    /// Projection of the resulting tile.
    pub fn view(&self) -> TileView {
        TileView {
            id: self.id(),
            position: self.position(),
            value: self.value(),
            merged_this_round: matches!(self, Self::Merged { .. }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_change_reports_removed_sources() {
        let change = TileChange::Merged {
            id: TileId(5),
            position: Position::ORIGIN,
            value: 8,
            sources: [TileId(1), TileId(2)],
            origins: [Position::new(0, 0), Position::new(1, 0)],
        };
        assert!(change.changes_value());
        assert_eq!(change.removed(), &[TileId(1), TileId(2)]);
        assert!(change.view().merged_this_round);
    }

    #[test]
    fn moved_change_keeps_value_display() {
        let change = TileChange::Moved {
            id: TileId(3),
            from: Position::new(3, 0),
            to: Position::new(0, 0),
            value: 4,
        };
        assert!(!change.changes_value());
        assert!(change.removed().is_empty());
        assert_eq!(change.position(), Position::ORIGIN);
    }
}
