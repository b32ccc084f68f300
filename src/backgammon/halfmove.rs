use std::fmt::Debug;

use serde::Serialize;

use crate::backgammon::Position;

/// One checker moved with one die.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HalfMove {
    from: Position,
    to: Position,
    die: u8,
    hit: bool,
}

impl HalfMove {
    pub fn new(from: Position, to: Position, die: u8, hit: bool) -> Self {
        HalfMove { from, to, die, hit }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    /// The die value this move consumes.
    pub fn die(&self) -> u8 {
        self.die
    }

    /// Whether the move sends a lone opposing checker to the bar.
    pub fn is_hit(&self) -> bool {
        self.hit
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.die)?;
        if self.hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}
