//! Move direction definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The four move directions a player can request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDirectionError {
    #[error("unknown direction `{0}`")]
    UnknownName(String),
    #[error("direction index {0} out of range (expected 0..=3)")]
    BadIndex(u8),
}

impl Direction {
    /// All directions in evaluation order: Up, Down, Left, Right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Arrow glyph used in advisor text.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(ParseDirectionError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            _ => Err(ParseDirectionError::BadIndex(value)),
        }
    }
}
