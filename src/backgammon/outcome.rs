use serde::{Deserialize, Serialize};

use crate::backgammon::Color;

/// Result of a game, with the scoring category of a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "result", content = "winner", rename_all = "lowercase")]
pub enum GameOutcome {
    Ongoing,
    Win(Color),
    Gammon(Color),
    Backgammon(Color),
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::Ongoing => None,
            GameOutcome::Win(color) | GameOutcome::Gammon(color) | GameOutcome::Backgammon(color) => {
                Some(*color)
            }
        }
    }

    /// Points the winner scores for this game.
    pub fn points(&self) -> u8 {
        match self {
            GameOutcome::Ongoing => 0,
            GameOutcome::Win(_) => 1,
            GameOutcome::Gammon(_) => 2,
            GameOutcome::Backgammon(_) => 3,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }
}
