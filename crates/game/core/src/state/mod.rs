//! Authoritative game state representation.
//!
//! This module owns the board, score, and turn bookkeeping. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
pub mod delta;
pub mod types;

pub use delta::TileChange;
pub use types::{
    Board, BoardError, BoardSnapshot, Position, Tile, TileError, TileId, TileIds, TileView,
};

/// Lifecycle of a game. `Won` and `Lost` are terminal.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic spawns.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `nonce` to generate unique seeds for each spawn.
    pub game_seed: u64,

    /// Number of accepted (board-changing) moves.
    pub nonce: u64,

    /// Running total of merge results.
    pub score: u64,

    pub status: GameStatus,

    pub board: Board,

    /// Tile identity allocator. Never reused within a game.
    tile_ids: TileIds,
}

impl GameState {
    /// Creates a state with an empty board of the given size.
    pub fn new(game_seed: u64, width: usize, height: usize) -> Self {
        Self {
            game_seed,
            nonce: 0,
            score: 0,
            status: GameStatus::Playing,
            board: Board::new(width, height),
            tile_ids: TileIds::new(),
        }
    }

    /// Creates a state around a prepared board (scenarios and tests).
    ///
    /// `tile_ids` must be the allocator that produced the board's tiles so
    /// later merges and spawns keep identities unique.
    pub fn with_board(game_seed: u64, board: Board, tile_ids: TileIds) -> Self {
        Self {
            game_seed,
            nonce: 0,
            score: 0,
            status: GameStatus::Playing,
            board,
            tile_ids,
        }
    }

    /// Builds a state from a value grid where `0` marks an empty cell.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] from [`Board::from_rows`].
    pub fn from_rows<R>(game_seed: u64, rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[u32]>,
    {
        let mut tile_ids = TileIds::new();
        let board = Board::from_rows(rows, &mut tile_ids)?;
        Ok(Self::with_board(game_seed, board, tile_ids))
    }

    /// Looks up a live tile by identity.
    ///
    /// Presentation layers keep ids, never references into the board, and
    /// resolve them through here.
    pub fn tile(&self, id: TileId) -> Option<TileView> {
        self.board.find(id)
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub(crate) fn tile_ids_mut(&mut self) -> &mut TileIds {
        &mut self.tile_ids
    }

    /// Board and tile ids, borrowed together for the engine.
    pub(crate) fn board_and_ids(&mut self) -> (&mut Board, &mut TileIds) {
        (&mut self.board, &mut self.tile_ids)
    }
}
