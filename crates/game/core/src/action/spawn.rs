//! New-tile placement after a successful move.

use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed, context};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Board, Tile, TileIds, TileView};

/// Places a 2 or a 4 on a uniformly chosen empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPolicy {
    four_chance_percent: u32,
}

impl SpawnPolicy {
    pub const fn new(four_chance_percent: u32) -> Self {
        Self {
            four_chance_percent,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.four_chance_percent)
    }

    /// Spawns one tile.
    ///
    /// `slot` separates several spawns that share the same `nonce` (the
    /// initial tiles of a reset).
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::NoEmptyCell`] when the board is full. The board
    /// is unchanged in that case.
    pub fn spawn<R>(
        &self,
        board: &mut Board,
        ids: &mut TileIds,
        rng: &R,
        game_seed: u64,
        nonce: u64,
        slot: u32,
    ) -> Result<TileView, SpawnError>
    where
        R: RngOracle + ?Sized,
    {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(SpawnError::NoEmptyCell);
        }

        let cell_seed = compute_seed(game_seed, nonce, context::spawn(slot, context::SPAWN_CELL));
        let value_seed = compute_seed(game_seed, nonce, context::spawn(slot, context::SPAWN_VALUE));

        let position = empty[rng.index(cell_seed, empty.len())];
        let value = if rng.roll_d100(value_seed) <= self.four_chance_percent {
            4
        } else {
            2
        };

        let tile = Tile::new(ids.allocate(), value)?;
        board.put(position, tile);

        Ok(tile.view(position))
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_FOUR_CHANCE_PERCENT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnError {
    /// Informational: there was nowhere to put a tile.
    #[error("no empty cell to spawn into")]
    NoEmptyCell,

    #[error(transparent)]
    InvalidTile(#[from] crate::state::TileError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEmptyCell => ErrorSeverity::Recoverable,
            Self::InvalidTile(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEmptyCell => "SPAWN_NO_EMPTY_CELL",
            Self::InvalidTile(_) => "SPAWN_INVALID_TILE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::Position;

    /// Oracle that always returns the same number.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn full_board_reports_no_empty_cell() {
        let mut ids = TileIds::new();
        let mut board = Board::from_rows(&[[2u32, 4], [8, 16]], &mut ids).unwrap();
        let before = board.clone();

        let result = SpawnPolicy::default().spawn(&mut board, &mut ids, &PcgRng, 1, 1, 0);
        assert_eq!(result, Err(SpawnError::NoEmptyCell));
        assert_eq!(board, before);
        assert!(SpawnError::NoEmptyCell.severity().is_recoverable());
    }

    #[test]
    fn spawns_into_chosen_empty_cell() {
        let mut ids = TileIds::new();
        let mut board = Board::from_rows(&[[2u32, 0], [0, 0]], &mut ids).unwrap();

        // index 1 of [(1,0), (0,1), (1,1)]; d100 roll of 2 is within 10%.
        let view = SpawnPolicy::default()
            .spawn(&mut board, &mut ids, &FixedRng(1), 0, 0, 0)
            .unwrap();
        assert_eq!(view.position, Position::new(0, 1));
        assert_eq!(view.value, 4);
        assert!(!view.merged_this_round);
        assert_eq!(board.get(Position::new(0, 1)).map(Tile::value), Some(4));
    }

    #[test]
    fn high_roll_spawns_a_two() {
        let mut ids = TileIds::new();
        let mut board = Board::new(2, 2);
        let view = SpawnPolicy::default()
            .spawn(&mut board, &mut ids, &FixedRng(99), 0, 0, 0)
            .unwrap();
        assert_eq!(view.value, 2);
        assert_eq!(view.position, Position::new(1, 1));
    }

    #[test]
    fn spawn_distribution_is_roughly_ninety_ten() {
        let policy = SpawnPolicy::default();
        let mut fours = 0;
        for nonce in 0..10_000 {
            let mut ids = TileIds::new();
            let mut board = Board::new(4, 4);
            let view = policy
                .spawn(&mut board, &mut ids, &PcgRng, 12345, nonce, 0)
                .unwrap();
            if view.value == 4 {
                fours += 1;
            }
        }
        assert!((700..=1300).contains(&fours), "got {fours} fours");
    }

    #[test]
    fn same_inputs_spawn_same_tile() {
        let spawn = || {
            let mut ids = TileIds::new();
            let mut board = Board::new(4, 4);
            SpawnPolicy::default()
                .spawn(&mut board, &mut ids, &PcgRng, 99, 3, 1)
                .unwrap()
        };
        assert_eq!(spawn(), spawn());
    }
}
