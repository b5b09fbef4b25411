//! Deterministic rules for a 2048-style sliding tile puzzle.
//!
//! `game-core` defines the canonical rules (slide, merge, spawn, win/loss) and
//! exposes pure APIs that any frontend can drive. All state mutation flows
//! through [`engine::GameEngine`]; [`GameSession`] wraps it with ownership of
//! the configuration and RNG oracle for callers that just want to play.
//!
//! Rendering, input capture, and animation live outside this crate. They
//! consume [`MoveResult`] and [`BoardSnapshot`] and may register a
//! [`TileDisplay`] to be told which tiles need redrawing.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod session;
pub mod state;

pub use action::{Direction, InvalidDirection, MoveEngine, SlideOutcome, SpawnError, SpawnPolicy};
pub use config::{ConfigError, GameConfig};
pub use engine::{ExecuteError, GameEngine, MoveResult, TileDisplay, notify_display};
pub use env::{Env, GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use session::GameSession;
pub use state::{
    Board, BoardError, BoardSnapshot, GameState, GameStatus, Position, Tile, TileChange,
    TileError, TileId, TileIds, TileView,
};
