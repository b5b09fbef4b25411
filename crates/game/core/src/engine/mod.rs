//! Turn resolution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. One call
//! to [`GameEngine::execute`] fully resolves a move: merge flags are reset,
//! tiles slide and merge, a tile spawns, and terminal conditions are checked.
//! Nothing is suspended half-way, so moves apply strictly in call order.

mod errors;
mod hook;
mod turns;

pub use errors::ExecuteError;
pub use hook::{TileDisplay, notify_display};

use crate::action::{Direction, MoveEngine, SlideOutcome, SpawnError, SpawnPolicy};
use crate::env::GameEnv;
use crate::state::{GameState, GameStatus, TileChange, TileId, TileView};

/// Complete outcome of one submitted move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResult {
    pub direction: Direction,

    /// False when the move was blocked; nothing else changed in that case.
    pub moved: bool,

    /// Points earned by merges in this move.
    pub score_delta: u64,

    /// Running score after the move.
    pub score: u64,

    /// Status after the move.
    pub status: GameStatus,

    /// Accepted move count after the move.
    pub nonce: u64,

    /// Slides, merges, and the spawn, in resolution order.
    pub changes: Vec<TileChange>,
}

impl MoveResult {
    /// Tiles whose displayed value must be refreshed (merge results and spawns).
    pub fn changed_tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        self.changes
            .iter()
            .filter(|change| change.changes_value())
            .map(TileChange::view)
    }

    /// Tiles destroyed by merges.
    pub fn removed_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.changes
            .iter()
            .flat_map(|change| change.removed().iter().copied())
    }

    /// Tile placed after the slide, if any.
    pub fn spawned(&self) -> Option<TileView> {
        self.changes
            .iter()
            .find(|change| matches!(change, TileChange::Spawned { .. }))
            .map(TileChange::view)
    }

    /// Returns true if this move ended the game.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Game engine that resolves moves against a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Resolves one move.
    ///
    /// A blocked move (no tile would change cell or value) is a no-op: the
    /// result has `moved == false` and the state, nonce included, is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::GameOver`] if the game already ended. The state
    /// is not modified.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        direction: Direction,
    ) -> Result<MoveResult, ExecuteError> {
        if self.state.status.is_terminal() {
            return Err(ExecuteError::game_over(
                self.state.status,
                self.state.nonce,
            ));
        }

        // Flags are cleared on a copy; the live board only changes once the
        // move is known to be accepted.
        let mut board = self.state.board.clone();
        board.clear_merge_flags();

        let SlideOutcome {
            board: next,
            score_delta,
            moved,
            mut changes,
        } = MoveEngine::apply(&board, direction, self.state.tile_ids_mut());

        if !moved {
            tracing::trace!(%direction, nonce = self.state.nonce, "blocked move ignored");
            return Ok(self.result(direction, false, 0, Vec::new()));
        }

        self.state.board = next;
        self.state.score += score_delta;
        self.state.nonce += 1;

        if let Some(view) = self.spawn(env, 0)? {
            changes.push(TileChange::Spawned {
                id: view.id,
                position: view.position,
                value: view.value,
            });
        }

        self.update_status(env.config());

        tracing::debug!(
            %direction,
            score_delta,
            score = self.state.score,
            nonce = self.state.nonce,
            changes = changes.len(),
            "move applied"
        );

        Ok(self.result(direction, true, score_delta, changes))
    }

    /// Places the configured number of start tiles on the current board.
    ///
    /// Rolls use the current nonce with one slot per tile, so the same seed
    /// always yields the same opening.
    ///
    /// # Errors
    ///
    /// Only an internal spawn failure is reported; a board that fills up
    /// early simply receives fewer tiles.
    pub fn seed_board(&mut self, env: GameEnv<'_>) -> Result<Vec<TileView>, ExecuteError> {
        let mut spawned = Vec::with_capacity(env.config().start_tiles);
        for slot in 0..env.config().start_tiles {
            let slot = u32::try_from(slot).unwrap_or(u32::MAX);
            match self.spawn(env, slot)? {
                Some(view) => spawned.push(view),
                None => break,
            }
        }
        self.update_status(env.config());
        Ok(spawned)
    }

    /// Spawns one tile, treating a full board as "nothing to do".
    fn spawn(&mut self, env: GameEnv<'_>, slot: u32) -> Result<Option<TileView>, ExecuteError> {
        let game_seed = self.state.game_seed;
        let nonce = self.state.nonce;
        let policy = SpawnPolicy::from_config(env.config());
        let (board, ids) = self.state.board_and_ids();

        match policy.spawn(board, ids, env.rng(), game_seed, nonce, slot) {
            Ok(view) => Ok(Some(view)),
            Err(SpawnError::NoEmptyCell) => {
                tracing::debug!(nonce, "board full, spawn skipped");
                Ok(None)
            }
            Err(error) => Err(ExecuteError::Spawn(error)),
        }
    }

    fn result(
        &self,
        direction: Direction,
        moved: bool,
        score_delta: u64,
        changes: Vec<TileChange>,
    ) -> MoveResult {
        MoveResult {
            direction,
            moved,
            score_delta,
            score: self.state.score,
            status: self.state.status,
            nonce: self.state.nonce,
            changes,
        }
    }
}
