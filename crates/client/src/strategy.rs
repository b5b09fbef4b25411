//! Move sources for the headless driver.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use game_core::{Board, Direction, GameSession, MoveEngine, TileIds};

/// Picks the next move for a session. `None` ends the run.
pub trait Strategy {
    fn next_move(&mut self, session: &GameSession) -> Option<Direction>;
}

/// One-ply lookahead: take the move that scores most, then the one that
/// leaves the most empty cells. Ties go to the earlier entry of
/// [`Direction::ALL`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Greedy {
    fn rank(board: &Board, direction: Direction) -> Option<(u64, usize)> {
        let outcome = MoveEngine::apply(board, direction, &mut TileIds::new());
        outcome
            .moved
            .then(|| (outcome.score_delta, outcome.board.empty_cells().len()))
    }
}

impl Strategy for Greedy {
    fn next_move(&mut self, session: &GameSession) -> Option<Direction> {
        if session.state().is_over() {
            return None;
        }

        let mut board = session.state().board.clone();
        board.clear_merge_flags();

        let mut best: Option<(Direction, (u64, usize))> = None;
        for direction in Direction::ALL {
            let Some(rank) = Self::rank(&board, direction) else {
                continue;
            };
            if best.is_none_or(|(_, best_rank)| rank > best_rank) {
                best = Some((direction, rank));
            }
        }
        best.map(|(direction, _)| direction)
    }
}

/// Replays a fixed list of moves in order.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    moves: VecDeque<Direction>,
}

impl Scripted {
    pub fn new(moves: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Parses entries such as `left`, `U` or `k`. Each entry may also hold
    /// several moves separated by commas or whitespace.
    pub fn parse<S>(entries: &[S]) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let mut moves = VecDeque::new();
        for entry in entries {
            for token in entry
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
            {
                let direction = token
                    .parse::<Direction>()
                    .with_context(|| format!("move #{} in script", moves.len() + 1))?;
                moves.push_back(direction);
            }
        }
        Ok(Self { moves })
    }
}

impl Strategy for Scripted {
    fn next_move(&mut self, _session: &GameSession) -> Option<Direction> {
        self.moves.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{GameConfig, GameState, PcgRng};

    use super::*;

    fn session(rows: &[[u32; 4]]) -> GameSession {
        let state = GameState::from_rows(0, rows).unwrap();
        let config = GameConfig::new().with_dimensions(4, rows.len());
        GameSession::from_state(config, PcgRng, state).unwrap()
    }

    #[test]
    fn greedy_prefers_scoring_moves() {
        let session = session(&[[2, 2, 0, 0], [0; 4], [0; 4], [4, 0, 0, 0]]);
        assert_eq!(Greedy.next_move(&session), Some(Direction::Left));
    }

    #[test]
    fn greedy_skips_blocked_directions() {
        // Only Right and Down change this board.
        let session = session(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(Greedy.next_move(&session), Some(Direction::Down));
    }

    #[test]
    fn greedy_stops_on_finished_game() {
        let mut session = session(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        session.play(Direction::Left).unwrap();
        assert_eq!(Greedy.next_move(&session), None);
    }

    #[test]
    fn script_parses_mixed_separators() {
        let script = Scripted::parse(&["left,up", "R d", " k "]).unwrap();
        assert_eq!(
            script.moves.iter().copied().collect::<Vec<_>>(),
            vec![
                Direction::Left,
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Up
            ]
        );
    }

    #[test]
    fn script_rejects_unknown_moves() {
        let error = Scripted::parse(&["left", "jump"]).unwrap_err();
        assert!(error.to_string().contains("move #2"));
    }
}
