use std::fmt::Display;

use crate::backgammon::Color;

/// A single checker. Only carries its color; points store counts and
/// hand out stacks of these on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checker {
    color: Color,
}

impl Checker {
    pub fn new(color: Color) -> Self {
        Checker { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Display for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}
