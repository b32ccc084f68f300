use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::backgammon::GameError;

/// Integer used at the public boundary for "the bar" as a source and
/// "off the board" as a destination.
pub const SENTINEL: i32 = -1;

/// Where a checker moves from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Bar,
    Off,
    Board(u8),
}

impl Position {
    /// Creates a Position on the board from an index (0-23).
    pub fn from_index(index: usize) -> Self {
        Position::Board(index as u8)
    }

    /// Reads a source argument: `-1` is the bar.
    pub fn source(value: i32) -> Result<Self, GameError> {
        match value {
            SENTINEL => Ok(Position::Bar),
            0..=23 => Ok(Position::Board(value as u8)),
            _ => Err(GameError::OutOfRange(value)),
        }
    }

    /// Reads a destination argument: `-1` bears off.
    pub fn destination(value: i32) -> Result<Self, GameError> {
        match value {
            SENTINEL => Ok(Position::Off),
            0..=23 => Ok(Position::Board(value as u8)),
            _ => Err(GameError::OutOfRange(value)),
        }
    }

    pub fn to_sentinel(&self) -> i32 {
        match self {
            Position::Bar | Position::Off => SENTINEL,
            Position::Board(index) => *index as i32,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Bar => write!(f, "bar"),
            Position::Off => write!(f, "off"),
            Position::Board(index) => write!(f, "{}", index + 1),
        }
    }
}
