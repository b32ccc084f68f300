use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Side of the table. White moves from point 24 towards point 1,
/// Black from point 1 towards point 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Slot of this color in per-color arrays.
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Sign used by the board's signed point counts.
    pub fn sign(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Board indices of the six points this color bears off from.
    pub fn home_quadrant(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Color::White => 0..=5,
            Color::Black => 18..=23,
        }
    }

    pub fn is_in_home(&self, index: usize) -> bool {
        self.home_quadrant().contains(&index)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    color: Color,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Player {
            name: name.into(),
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
