//! Owning facade over state, configuration, and oracles.
//!
//! [`GameSession`] is what a frontend holds: it accepts moves one at a time,
//! exposes read-only snapshots, and pushes tile refreshes to registered
//! [`TileDisplay`]s once each move has been fully resolved.

use arrayvec::ArrayVec;

use crate::action::{Direction, MoveEngine};
use crate::config::{ConfigError, GameConfig};
use crate::engine::{ExecuteError, GameEngine, MoveResult, TileDisplay, notify_display};
use crate::env::{Env, PcgRng, RngOracle};
use crate::state::{BoardSnapshot, GameState, GameStatus, TileId, TileView};

/// A single game plus everything needed to advance it.
pub struct GameSession<R = PcgRng>
where
    R: RngOracle,
{
    config: GameConfig,
    rng: R,
    state: GameState,
    displays: Vec<Box<dyn TileDisplay>>,
}

impl GameSession<PcgRng> {
    /// Starts a game with the default PCG oracle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not describe a playable game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, PcgRng, seed)
    }
}

impl<R> GameSession<R>
where
    R: RngOracle,
{
    /// Starts a game with a custom RNG oracle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not describe a playable game.
    pub fn with_rng(config: GameConfig, rng: R, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(seed, config.width, config.height);
        let mut session = Self {
            config,
            rng,
            state,
            displays: Vec::new(),
        };
        session.reset(seed);
        Ok(session)
    }

    /// Resumes from an existing state, e.g. a scenario built with
    /// [`GameState::from_rows`]. No tiles are added, but a game still in
    /// play is re-evaluated, so a deadlocked or winning board starts out
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid or its dimensions do not
    /// match the state's board.
    pub fn from_state(
        config: GameConfig,
        rng: R,
        mut state: GameState,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if state.board.width() != config.width || state.board.height() != config.height {
            return Err(ConfigError::InvalidDimensions {
                width: state.board.width(),
                height: state.board.height(),
            });
        }
        if !state.is_over() {
            state.status = GameEngine::evaluate(&state.board, &config);
        }
        Ok(Self {
            config,
            rng,
            state,
            displays: Vec::new(),
        })
    }

    /// Registers a display that is told about every tile refresh.
    pub fn add_display(&mut self, display: Box<dyn TileDisplay>) {
        self.displays.push(display);
    }

    /// Throws the current game away and starts over with `seed`.
    ///
    /// The new board holds the configured number of start tiles; every
    /// registered display is told about each of them.
    pub fn reset(&mut self, seed: u64) -> &GameState {
        self.state = GameState::new(seed, self.config.width, self.config.height);

        let env = Env::new(&self.config, &self.rng).as_game_env();
        let spawned = match GameEngine::new(&mut self.state).seed_board(env) {
            Ok(spawned) => spawned,
            Err(error) => {
                tracing::warn!(%error, seed, "failed to seed board");
                Vec::new()
            }
        };

        for display in &mut self.displays {
            for tile in &spawned {
                display.update_value_display(tile);
            }
        }

        tracing::info!(
            seed,
            width = self.config.width,
            height = self.config.height,
            tiles = spawned.len(),
            "game reset"
        );
        &self.state
    }

    /// Submits one move.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::GameOver`] once the game has ended.
    pub fn play(&mut self, direction: Direction) -> Result<MoveResult, ExecuteError> {
        let env = Env::new(&self.config, &self.rng).as_game_env();
        let result = GameEngine::new(&mut self.state).execute(env, direction)?;

        if result.moved {
            for display in &mut self.displays {
                notify_display(display.as_mut(), &result);
            }
        }

        Ok(result)
    }

    /// Parses `input` as a direction and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::InvalidDirection`] for unrecognised input,
    /// before the game is touched.
    pub fn play_str(&mut self, input: &str) -> Result<MoveResult, ExecuteError> {
        let direction = input.parse::<Direction>()?;
        self.play(direction)
    }

    /// Read-only `(position, value)` view of the board.
    pub fn current_board(&self) -> BoardSnapshot {
        self.state.board.snapshot()
    }

    /// Directions that would currently change the board.
    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        if self.state.is_over() {
            return ArrayVec::new();
        }
        // merge flags from the previous move are dropped before the next one
        let mut board = self.state.board.clone();
        board.clear_merge_flags();
        MoveEngine::legal_moves(&board)
    }

    /// Looks up a live tile by identity.
    pub fn tile(&self, id: TileId) -> Option<TileView> {
        self.state.tile(id)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }
}

impl<R> std::fmt::Debug for GameSession<R>
where
    R: RngOracle,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("displays", &self.displays.len())
            .finish_non_exhaustive()
    }
}
