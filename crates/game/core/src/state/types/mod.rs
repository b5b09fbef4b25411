pub mod board;
pub mod common;
pub mod tile;

// Re-export common types
pub use common::{Position, TileId, TileIds};

// Re-export tile types
pub use tile::{Tile, TileError, TileView};

// Re-export board types
pub use board::{Board, BoardError, BoardSnapshot};
