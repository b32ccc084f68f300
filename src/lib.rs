//! Two-player Backgammon rules engine.
//!
//! [`backgammon::Game`] owns the board, the dice and both players, validates
//! every move against the rules and detects the end of the game with its
//! scoring category. [`simulation`] plays random games through the same API.

pub mod backgammon;
pub mod simulation;
