//! Driver configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use game_core::GameConfig;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Seed for spawn rolls. `None` derives one from the clock.
    pub seed: Option<u64>,
    pub game: GameConfig,
    /// Upper bound on submitted moves, accepted or blocked.
    pub max_moves: usize,
    /// Directory for the log file. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            game: GameConfig::default(),
            max_moves: Self::DEFAULT_MAX_MOVES,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_MAX_MOVES: usize = 10_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TWENTY48_SEED` - Spawn seed (default: derived from the clock)
    /// - `TWENTY48_WIDTH` / `TWENTY48_HEIGHT` - Board size (default: 4)
    /// - `TWENTY48_WIN_VALUE` - Winning tile (default: 2048)
    /// - `TWENTY48_START_TILES` - Tiles placed by a reset (default: 2)
    /// - `TWENTY48_FOUR_CHANCE_PERCENT` - Chance a spawn is a 4 (default: 10)
    /// - `TWENTY48_MAX_MOVES` - Move cap for a run (default: 10000)
    /// - `TWENTY48_LOG_DIR` - Also write logs to `<dir>/twenty48.log`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64, _>(&lookup, "TWENTY48_SEED") {
            config.seed = Some(seed);
        }
        if let Some(width) = read_env(&lookup, "TWENTY48_WIDTH") {
            config.game.width = width;
        }
        if let Some(height) = read_env(&lookup, "TWENTY48_HEIGHT") {
            config.game.height = height;
        }
        if let Some(win_value) = read_env(&lookup, "TWENTY48_WIN_VALUE") {
            config.game.win_value = win_value;
        }
        if let Some(start_tiles) = read_env(&lookup, "TWENTY48_START_TILES") {
            config.game.start_tiles = start_tiles;
        }
        if let Some(percent) = read_env(&lookup, "TWENTY48_FOUR_CHANCE_PERCENT") {
            config.game.four_chance_percent = percent;
        }
        if let Some(max_moves) = read_env::<usize, _>(&lookup, "TWENTY48_MAX_MOVES") {
            config.max_moves = max_moves.max(1);
        }
        if let Some(dir) = lookup("TWENTY48_LOG_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
