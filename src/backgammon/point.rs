use serde::{Deserialize, Serialize};

use crate::backgammon::{BoardError, Checker, Color};

/// Read view of one of the 24 points: how many checkers and whose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub count: u8,
    pub color: Option<Color>,
}

impl Point {
    pub const EMPTY: Point = Point {
        count: 0,
        color: None,
    };

    pub fn new(count: u8, color: Color) -> Self {
        match count {
            0 => Point::EMPTY,
            _ => Point {
                count,
                color: Some(color),
            },
        }
    }

    /// Decodes the board's signed representation.
    /// Positive values are White checkers, negative values Black.
    pub fn from_signed(value: i8) -> Self {
        match value {
            0 => Point::EMPTY,
            v if v > 0 => Point::new(v as u8, Color::White),
            v => Point::new(v.unsigned_abs(), Color::Black),
        }
    }

    /// Signed count, widened so any `u8` count fits.
    pub fn to_signed(&self) -> i16 {
        match self.color {
            Some(color) => i16::from(color.sign()) * i16::from(self.count),
            None => 0,
        }
    }

    /// Builds the point from a stack of checkers. Fails if the stack mixes colors.
    pub fn from_checkers(checkers: &[Checker]) -> Result<Self, BoardError> {
        let Some(first) = checkers.first() else {
            return Ok(Point::EMPTY);
        };
        if checkers.iter().any(|c| c.color() != first.color()) {
            return Err(BoardError::MixedColors);
        }
        Ok(Point::new(checkers.len() as u8, first.color()))
    }

    pub fn checkers(&self) -> Vec<Checker> {
        match self.color {
            Some(color) => vec![Checker::new(color); self.count as usize],
            None => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_owned_by(&self, color: Color) -> bool {
        self.color == Some(color)
    }

    /// Two or more opposing checkers make a point unavailable to `mover`.
    pub fn blocks(&self, mover: Color) -> bool {
        self.color == Some(mover.opposite()) && self.count >= 2
    }

    /// A lone opposing checker gets hit when `mover` lands here.
    pub fn is_blot_for(&self, mover: Color) -> bool {
        self.color == Some(mover.opposite()) && self.count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_conversion() {
        let point = Point::new(3, Color::Black);
        let stack = point.checkers();
        assert_eq!(stack.len(), 3);
        assert!(stack.iter().all(|c| c.color() == Color::Black));
        assert_eq!(Point::from_checkers(&stack), Ok(point));
        assert_eq!(Point::from_checkers(&[]), Ok(Point::EMPTY));
    }

    #[test]
    fn test_mixed_stack_is_rejected() {
        let stack = [Checker::new(Color::White), Checker::new(Color::Black)];
        assert_eq!(Point::from_checkers(&stack), Err(BoardError::MixedColors));
    }

    #[test]
    fn test_signed_conversion() {
        for value in i8::MIN..=i8::MAX {
            assert_eq!(Point::from_signed(value).to_signed(), i16::from(value));
        }
        assert_eq!(Point::from_signed(-128), Point::new(128, Color::Black));
        assert_eq!(Point::new(200, Color::White).to_signed(), 200);
        assert_eq!(Point::new(255, Color::Black).to_signed(), -255);
        assert_eq!(Point::from_signed(-2), Point::new(2, Color::Black));
        assert_eq!(Point::new(0, Color::White), Point::EMPTY);
    }

    #[test]
    fn test_blocking() {
        let blot = Point::new(1, Color::Black);
        let block = Point::new(2, Color::Black);
        assert!(blot.is_blot_for(Color::White));
        assert!(!blot.blocks(Color::White));
        assert!(block.blocks(Color::White));
        assert!(!block.blocks(Color::Black));
        assert!(!Point::EMPTY.blocks(Color::White));
    }
}
