use thiserror::Error;

use crate::backgammon::Color;

/// Structural failures of the board primitives. The rule layer validates
/// before touching the board, so these should not surface through [`crate::backgammon::Game`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("point index {0} is out of range (expected 0-23)")]
    OutOfRange(usize),
    #[error("point {} has no checkers", .0 + 1)]
    EmptyPoint(usize),
    #[error("{0} has no checkers on the bar")]
    EmptyBar(Color),
    #[error("point {} is held by {color}", .index + 1)]
    Occupied { index: usize, color: Color },
    #[error("a point cannot hold checkers of both colors")]
    MixedColors,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiceError {
    #[error("no die showing {0} is available")]
    InvalidDice(u8),
    #[error("die value {0} is out of range (expected 1-6)")]
    OutOfRange(u8),
}

/// A rule violation the player can correct by choosing another move.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("source and destination are the same")]
    SamePoint,
    #[error("{0} must enter its checkers from the bar first")]
    BarNotCleared(Color),
    #[error("{0} has no checkers on the bar")]
    EmptyBar(Color),
    #[error("point {} is empty", .0 + 1)]
    EmptySource(usize),
    #[error("point {} holds {owner} checkers, not {mover}", .index + 1)]
    WrongColor {
        index: usize,
        owner: Color,
        mover: Color,
    },
    #[error("{color} cannot move backward from point {} to point {}", .from + 1, .to + 1)]
    Backward { color: Color, from: usize, to: usize },
    #[error("{color} cannot enter from the bar on point {}", .to + 1)]
    InvalidEntry { color: Color, to: usize },
    #[error("{0} cannot bear off straight from the bar")]
    BarToOff(Color),
    #[error("cannot move from off the board")]
    FromOff,
    #[error("cannot move onto the bar")]
    ToBar,
    #[error("distance {actual} does not match the required distance {expected}")]
    DistanceMismatch { expected: u8, actual: u8 },
    #[error("{0} cannot bear off until all its checkers are home")]
    CannotBearOff(Color),
    #[error("point {} is blocked by {owner}", .index + 1)]
    Blocked { index: usize, owner: Color },
    #[error("no die showing {0} is available")]
    DieUnavailable(u8),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),
    #[error("the game is over")]
    GameOver,
    #[error("position {0} is out of range (expected 0-23 or -1)")]
    OutOfRange(i32),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Dice(#[from] DiceError),
}
