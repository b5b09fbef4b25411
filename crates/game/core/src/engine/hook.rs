//! Post-move notifications for presentation layers.
//!
//! The core never holds a render type. Presentation code implements
//! [`TileDisplay`], keeps its own sprites keyed by [`TileId`], and is told which
//! tiles need a fresh numeral once a move has been fully resolved.

use crate::state::{TileId, TileView};

use super::MoveResult;

/// Receives per-tile refresh requests after each resolved move.
pub trait TileDisplay {
    /// The value shown for `tile` changed (merge result or new spawn) and its
    /// numeral/colour should be redrawn.
    fn update_value_display(&mut self, tile: &TileView);

    /// `id` was merged away and no longer exists on the board.
    fn tile_removed(&mut self, _id: TileId) {}
}

/// Forwards `result` to `display`: removals first, then value refreshes.
pub fn notify_display<D>(display: &mut D, result: &MoveResult)
where
    D: TileDisplay + ?Sized,
{
    for id in result.removed_tiles() {
        display.tile_removed(id);
    }
    for tile in result.changed_tiles() {
        display.update_value_display(&tile);
    }
}
