use std::fmt::Debug;

use hashbrown::HashMap;
use rand::Rng;

use crate::backgammon::DiceError;

/// The two dice of the active turn and the distances still unplayed.
///
/// A double grants the rolled value four times, any other roll grants
/// each value once. Consumption is tracked per distance value.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Dice {
    values: Option<(u8, u8)>,
    remaining: HashMap<u8, u8>,
}

impl Dice {
    pub fn new() -> Self {
        Dice::default()
    }

    /// Dice showing fixed values, ready to be played.
    pub fn from_numbers(die1: u8, die2: u8) -> Result<Self, DiceError> {
        let mut dice = Dice::new();
        dice.set(die1, die2)?;
        Ok(dice)
    }

    /// Rolls both dice with `rng` and returns the usable distances.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<u8> {
        let die1 = rng.random_range(1..=6);
        let die2 = rng.random_range(1..=6);
        self.load(die1, die2);
        self.rolled_distances()
    }

    /// Same as [`Self::roll`] but with values chosen by the caller.
    pub fn set(&mut self, die1: u8, die2: u8) -> Result<Vec<u8>, DiceError> {
        for die in [die1, die2] {
            if !(1..=6).contains(&die) {
                return Err(DiceError::OutOfRange(die));
            }
        }
        self.load(die1, die2);
        Ok(self.rolled_distances())
    }

    fn load(&mut self, die1: u8, die2: u8) {
        self.values = Some((die1, die2));
        self.remaining.clear();
        if die1 == die2 {
            self.remaining.insert(die1, 4);
        } else {
            self.remaining.insert(die1, 1);
            self.remaining.insert(die2, 1);
        }
    }

    pub fn values(&self) -> Option<(u8, u8)> {
        self.values
    }

    pub fn is_double(&self) -> bool {
        matches!(self.values, Some((a, b)) if a == b)
    }

    /// Every distance the last roll granted, used or not.
    pub fn rolled_distances(&self) -> Vec<u8> {
        match self.values {
            Some((a, b)) if a == b => vec![a; 4],
            Some((a, b)) => vec![a, b],
            None => Vec::new(),
        }
    }

    /// Unplayed distances mapped to how many times each can still be used.
    pub fn available_distances(&self) -> &HashMap<u8, u8> {
        &self.remaining
    }

    /// Unplayed distances in ascending order, repeated for doubles.
    pub fn available(&self) -> Vec<u8> {
        let mut dice: Vec<u8> = self
            .remaining
            .iter()
            .flat_map(|(&die, &count)| std::iter::repeat_n(die, count as usize))
            .collect();
        dice.sort_unstable();
        dice
    }

    /// Distinct unplayed distances in ascending order.
    pub fn unique_available(&self) -> Vec<u8> {
        let mut dice: Vec<u8> = self.remaining.keys().copied().collect();
        dice.sort_unstable();
        dice
    }

    pub fn is_available(&self, die: u8) -> bool {
        self.remaining.contains_key(&die)
    }

    /// Smallest unplayed die that covers `distance`.
    pub fn smallest_at_least(&self, distance: u8) -> Option<u8> {
        self.remaining.keys().copied().filter(|&die| die >= distance).min()
    }

    pub fn consume(&mut self, die: u8) -> Result<(), DiceError> {
        let count = self.remaining.get(&die).copied().ok_or(DiceError::InvalidDice(die))?;
        if count > 1 {
            self.remaining.insert(die, count - 1);
        } else {
            self.remaining.remove(&die);
        }
        Ok(())
    }

    pub fn all_used(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn clear(&mut self) {
        self.values = None;
        self.remaining.clear();
    }
}

impl Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.values {
            None => write!(f, "Dice(not rolled)"),
            Some((a, b)) if a == b => write!(f, "Double({}): remaining {:?}", a, self.available()),
            Some((a, b)) => write!(f, "Dice({} | {}): remaining {:?}", a, b, self.available()),
        }
    }
}
