use crate::action::{InvalidDirection, SpawnError};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::GameStatus;

/// Errors surfaced while executing a move through the game engine.
///
/// `GameOver` and `InvalidDirection` are raised before anything is touched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    /// A move arrived after the game reached a terminal state.
    #[error("game is already {status} after {} moves", .context.nonce)]
    GameOver {
        status: GameStatus,
        context: ErrorContext,
    },

    /// Boundary input did not name a direction.
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirection),

    #[error("spawn failed: {0}")]
    Spawn(SpawnError),
}

impl ExecuteError {
    pub fn game_over(status: GameStatus, nonce: u64) -> Self {
        Self::GameOver {
            status,
            context: ErrorContext::new(nonce).with_message("no moves accepted after game over"),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver { .. } => ErrorSeverity::Recoverable,
            Self::InvalidDirection(error) => error.severity(),
            Self::Spawn(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::GameOver { context, .. } => Some(context),
            Self::InvalidDirection(_) | Self::Spawn(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver { .. } => "GAME_OVER",
            Self::InvalidDirection(error) => error.error_code(),
            Self::Spawn(error) => error.error_code(),
        }
    }
}
