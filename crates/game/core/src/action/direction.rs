use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Direction the whole board slides toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Cells of every line the move acts on, each ordered from the edge the
    /// tiles move toward.
    ///
    /// Left/Right yield rows, Up/Down yield columns.
    pub fn lines(self, width: usize, height: usize) -> Vec<Vec<Position>> {
        match self {
            Direction::Left => (0..height)
                .map(|y| (0..width).map(|x| Position::new(x, y)).collect())
                .collect(),
            Direction::Right => (0..height)
                .map(|y| (0..width).rev().map(|x| Position::new(x, y)).collect())
                .collect(),
            Direction::Up => (0..width)
                .map(|x| (0..height).map(|y| Position::new(x, y)).collect())
                .collect(),
            Direction::Down => (0..width)
                .map(|x| (0..height).rev().map(|y| Position::new(x, y)).collect())
                .collect(),
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    /// Accepts names and single-letter or vi-style shorthands, case-insensitively.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "k" | "north" => Ok(Direction::Up),
            "down" | "d" | "j" | "south" => Ok(Direction::Down),
            "left" | "l" | "h" | "west" => Ok(Direction::Left),
            "right" | "r" | "east" => Ok(Direction::Right),
            _ => Err(InvalidDirection::Name(input.to_owned())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    /// `0 = Up, 1 = Down, 2 = Left, 3 = Right`.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(InvalidDirection::Code(code))
    }
}

/// Input that does not name a direction, rejected before any processing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidDirection {
    #[error("'{0}' is not a direction (expected up, down, left or right)")]
    Name(String),

    #[error("direction code {0} is out of range 0..=3")]
    Code(u8),
}

impl GameError for InvalidDirection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "INVALID_DIRECTION"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_shorthands() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" UP ".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("j".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("r".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(InvalidDirection::Name("sideways".into()))
        );
    }

    #[test]
    fn converts_codes() {
        assert_eq!(Direction::try_from(3), Ok(Direction::Right));
        assert_eq!(Direction::try_from(4), Err(InvalidDirection::Code(4)));
    }

    #[test]
    fn displays_snake_case() {
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn lines_start_at_leading_edge() {
        let right = Direction::Right.lines(3, 2);
        assert_eq!(right.len(), 2);
        assert_eq!(
            right[1],
            vec![Position::new(2, 1), Position::new(1, 1), Position::new(0, 1)]
        );

        let down = Direction::Down.lines(3, 2);
        assert_eq!(down.len(), 3);
        assert_eq!(down[0], vec![Position::new(0, 1), Position::new(0, 0)]);
    }
}
