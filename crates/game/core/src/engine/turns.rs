use crate::config::GameConfig;
use crate::state::{Board, GameStatus};

use super::GameEngine;

/// Terminal-condition checks for GameEngine.
impl GameEngine<'_> {
    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Status implied by `board` under `config`.
    ///
    /// A win is checked first, so a move that both reaches the win value and
    /// fills the board without pairs counts as won.
    pub fn evaluate(board: &Board, config: &GameConfig) -> GameStatus {
        if board.max_value() >= config.win_value {
            GameStatus::Won
        } else if !board.has_legal_move() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    /// Re-evaluates the status and logs terminal transitions.
    pub(super) fn update_status(&mut self, config: &GameConfig) -> GameStatus {
        let previous = self.state.status;
        let status = Self::evaluate(&self.state.board, config);
        self.state.status = status;

        if status != previous && status.is_terminal() {
            tracing::info!(
                %status,
                score = self.state.score,
                max_tile = self.state.board.max_value(),
                moves = self.state.nonce,
                "game over"
            );
        }

        status
    }
}
