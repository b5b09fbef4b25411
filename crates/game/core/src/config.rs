//! Game configuration constants and tunable parameters.

use crate::error::{ErrorSeverity, GameError};

/// Board geometry, win condition, and spawn weights for a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Tile value that ends the game with a win.
    pub win_value: u32,
    /// Tiles placed on the board by a reset.
    pub start_tiles: usize,
    /// Chance (0..=100) that a spawned tile is a 4 instead of a 2.
    pub four_chance_percent: u32,
}

impl GameConfig {
    // ===== compile-time limits =====
    /// Largest supported side length.
    pub const MAX_DIMENSION: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DIMENSION: usize = 4;
    pub const DEFAULT_WIN_VALUE: u32 = 2048;
    pub const DEFAULT_START_TILES: usize = 2;
    pub const DEFAULT_FOUR_CHANCE_PERCENT: u32 = 10;

    pub fn new() -> Self {
        Self {
            width: Self::DEFAULT_DIMENSION,
            height: Self::DEFAULT_DIMENSION,
            win_value: Self::DEFAULT_WIN_VALUE,
            start_tiles: Self::DEFAULT_START_TILES,
            four_chance_percent: Self::DEFAULT_FOUR_CHANCE_PERCENT,
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_win_value(mut self, win_value: u32) -> Self {
        self.win_value = win_value;
        self
    }

    #[must_use]
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    #[must_use]
    pub fn with_four_chance_percent(mut self, percent: u32) -> Self {
        self.four_chance_percent = percent;
        self
    }

    /// Total number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checked in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dimension in [self.width, self.height] {
            if dimension == 0 || dimension > Self::MAX_DIMENSION {
                return Err(ConfigError::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                });
            }
        }

        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::InvalidWinValue(self.win_value));
        }

        if self.start_tiles > self.cell_count() {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                cells: self.cell_count(),
            });
        }

        if self.four_chance_percent > 100 {
            return Err(ConfigError::InvalidSpawnChance(self.four_chance_percent));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("board dimensions {width}x{height} must be between 1 and 16 on each side")]
    InvalidDimensions { width: usize, height: usize },

    #[error("win value {0} must be a power of two of at least 4")]
    InvalidWinValue(u32),

    #[error("{start_tiles} start tiles do not fit on a board with {cells} cells")]
    TooManyStartTiles { start_tiles: usize, cells: usize },

    #[error("spawn chance {0}% is not a percentage")]
    InvalidSpawnChance(u32),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "CONFIG_INVALID_DIMENSIONS",
            Self::InvalidWinValue(_) => "CONFIG_INVALID_WIN_VALUE",
            Self::TooManyStartTiles { .. } => "CONFIG_TOO_MANY_START_TILES",
            Self::InvalidSpawnChance(_) => "CONFIG_INVALID_SPAWN_CHANCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 4);
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.start_tiles, 2);
        assert_eq!(config.four_chance_percent, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_and_oversized_dimensions() {
        let config = GameConfig::new().with_dimensions(0, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { width: 0, height: 4 })
        ));

        let config = GameConfig::new().with_dimensions(4, 17);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_win_value_that_is_not_power_of_two() {
        let config = GameConfig::new().with_win_value(1000);
        assert_eq!(config.validate(), Err(ConfigError::InvalidWinValue(1000)));

        let config = GameConfig::new().with_win_value(2);
        assert_eq!(config.validate(), Err(ConfigError::InvalidWinValue(2)));
    }

    #[test]
    fn rejects_more_start_tiles_than_cells() {
        let config = GameConfig::new().with_dimensions(1, 2).with_start_tiles(3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyStartTiles {
                start_tiles: 3,
                cells: 2
            })
        );
    }

    #[test]
    fn rejects_spawn_chance_above_hundred() {
        let config = GameConfig::new().with_four_chance_percent(101);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpawnChance(101)));
        assert_eq!(
            config.validate().unwrap_err().severity(),
            ErrorSeverity::Validation
        );
    }
}
