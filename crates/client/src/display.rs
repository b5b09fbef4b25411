//! Tile display that writes refreshes to the log instead of a screen.

use game_core::{TileDisplay, TileId, TileView};

/// Logs every tile refresh at `trace` level.
#[derive(Debug, Default)]
pub struct TraceDisplay {
    refreshed: usize,
}

impl TraceDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileDisplay for TraceDisplay {
    fn update_value_display(&mut self, tile: &TileView) {
        self.refreshed += 1;
        tracing::trace!(
            tile = %tile.id,
            at = %tile.position,
            value = tile.value,
            merged = tile.merged_this_round,
            refreshed = self.refreshed,
            "tile value changed"
        );
    }

    fn tile_removed(&mut self, id: TileId) {
        tracing::trace!(tile = %id, "tile removed");
    }
}
