//! Runs a strategy against a session and summarises the outcome.

use anyhow::{Context, Result};
use game_core::{GameError, GameSession, GameStatus};
use serde::Serialize;

use crate::strategy::Strategy;

/// Final report printed once a run ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub moves_played: usize,
    pub blocked_moves: usize,
    pub score: u64,
    pub status: GameStatus,
    pub max_tile: u32,
    pub board: Vec<Vec<u32>>,
}

impl Summary {
    pub fn from_session(session: &GameSession, moves_played: usize, blocked_moves: usize) -> Self {
        let state = session.state();
        Self {
            seed: state.game_seed,
            moves_played,
            blocked_moves,
            score: state.score,
            status: state.status,
            max_tile: state.board.max_value(),
            board: state.board.rows(),
        }
    }
}

/// Feeds moves from `strategy` until it runs dry, the session refuses a
/// move because the game has ended, or `max_moves` moves have been submitted.
pub fn run<S>(session: &mut GameSession, strategy: &mut S, max_moves: usize) -> Result<Summary>
where
    S: Strategy + ?Sized,
{
    let mut moves_played = 0;
    let mut blocked_moves = 0;

    while moves_played + blocked_moves < max_moves {
        let Some(direction) = strategy.next_move(session) else {
            break;
        };

        let result = match session.play(direction) {
            Ok(result) => result,
            Err(error) => {
                let severity = error.severity();
                tracing::warn!(
                    %direction,
                    code = error.error_code(),
                    severity = severity.as_str(),
                    nonce = error.context().map(|context| context.nonce),
                    "{error}"
                );
                if severity.is_recoverable() {
                    break;
                }
                return Err(error).with_context(|| format!("move {direction} rejected"));
            }
        };

        if result.moved {
            moves_played += 1;
            tracing::info!(
                %direction,
                score_delta = result.score_delta,
                score = result.score,
                "turn {}",
                result.nonce
            );
        } else {
            blocked_moves += 1;
            tracing::info!(%direction, "blocked move");
        }
    }

    let summary = Summary::from_session(session, moves_played, blocked_moves);
    match summary.status {
        GameStatus::Playing => tracing::info!(score = summary.score, "run stopped"),
        status => tracing::info!(%status, score = summary.score, "game finished"),
    }
    Ok(summary)
}
