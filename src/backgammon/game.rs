use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::backgammon::{
    Board, CHECKERS_PER_COLOR, Color, Dice, GameError, GameOutcome, HalfMove, MoveError, POINTS,
    Player, Point, Position,
};

/// A single game between two players. Player 1 plays White and moves first.
///
/// Every mutating call validates completely before it touches any state, so
/// a rejected call leaves the game exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    dice: Dice,
    turn: Color,
    outcome: GameOutcome,
    borne_off: [u8; 2],
    rng: ChaCha8Rng,
}

/// Per-color counter in a [`GameSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorCounts {
    pub white: u8,
    pub black: u8,
}

/// Everything a front-end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub points: Vec<Point>,
    pub bar: ColorCounts,
    pub borne_off: ColorCounts,
    pub turn: Color,
    pub current_player: String,
    pub dice: Vec<u8>,
    pub outcome: GameOutcome,
}

impl Game {
    pub fn new(name1: &str, name2: &str) -> Result<Self, GameError> {
        Self::with_seed(name1, name2, rand::random())
    }

    /// A game whose dice follow a fixed seed.
    pub fn with_seed(name1: &str, name2: &str, seed: u64) -> Result<Self, GameError> {
        Self::build(name1, name2, Board::new(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// A game starting from an arbitrary position, White to move.
    /// Checkers missing from the board count as borne off.
    pub fn from_board(name1: &str, name2: &str, board: Board) -> Result<Self, GameError> {
        Self::build(name1, name2, board, ChaCha8Rng::seed_from_u64(rand::random()))
    }

    fn build(name1: &str, name2: &str, board: Board, rng: ChaCha8Rng) -> Result<Self, GameError> {
        if name1.trim().is_empty() || name2.trim().is_empty() {
            return Err(GameError::InvalidArgument("player names cannot be empty".into()));
        }
        if name1 == name2 {
            return Err(GameError::InvalidArgument("player names must be different".into()));
        }

        let mut borne_off = [0; 2];
        for color in Color::ALL {
            let in_play = board.checkers_in_play(color);
            let Some(missing) = u32::from(CHECKERS_PER_COLOR).checked_sub(in_play) else {
                return Err(GameError::InvalidArgument(format!(
                    "{} has {} checkers in play, at most {} allowed",
                    color, in_play, CHECKERS_PER_COLOR
                )));
            };
            borne_off[color.index()] = missing as u8;
        }

        let mut game = Game {
            board,
            players: [Player::new(name1, Color::White), Player::new(name2, Color::Black)],
            dice: Dice::new(),
            turn: Color::White,
            outcome: GameOutcome::Ongoing,
            borne_off,
            rng,
        };
        game.outcome = game.evaluate_outcome();
        Ok(game)
    }

    /// Back to the starting position with the same players, White to move.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.dice.clear();
        self.turn = Color::White;
        self.outcome = GameOutcome::Ongoing;
        self.borne_off = [0; 2];
        info!("game restarted");
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.outcome {
            GameOutcome::Ongoing => Ok(()),
            _ => Err(GameError::GameOver),
        }
    }

    pub fn roll_dice(&mut self) -> Result<Vec<u8>, GameError> {
        self.ensure_in_progress()?;
        let distances = self.dice.roll(&mut self.rng);
        trace!(player = %self.turn, ?distances, "rolled dice");
        Ok(distances)
    }

    /// Loads dice values chosen by the caller instead of rolling.
    pub fn set_dice(&mut self, die1: u8, die2: u8) -> Result<Vec<u8>, GameError> {
        self.ensure_in_progress()?;
        let distances = self.dice.set(die1, die2)?;
        trace!(player = %self.turn, ?distances, "dice set");
        Ok(distances)
    }

    /// Moves a checker of the active player.
    ///
    /// `from` and `to` are board indices (0-23). `from = -1` enters from the
    /// bar and `to = -1` bears off. Without a `distance` the engine picks the
    /// die: the exact distance, or for a bear-off the smallest die that covers it.
    pub fn move_checker(&mut self, from: i32, to: i32, distance: Option<u8>) -> Result<HalfMove, GameError> {
        self.ensure_in_progress()?;
        if from == to {
            return Err(MoveError::SamePoint.into());
        }
        let from = Position::source(from)?;
        let to = Position::destination(to)?;
        self.play(from, to, distance)
    }

    /// Same as [`Self::move_checker`] with typed positions.
    pub fn play(&mut self, from: Position, to: Position, distance: Option<u8>) -> Result<HalfMove, GameError> {
        let half_move = self.plan(from, to, distance)?;
        self.apply(half_move)?;
        debug!(player = %self.turn, ?half_move, "moved checker");
        self.check_winner();
        Ok(half_move)
    }

    /// Distance a checker of `color` travels from `from` to `to`.
    pub fn calculate_distance(from: Position, to: Position, color: Color) -> Result<u8, GameError> {
        Self::check_on_board(from)?;
        Self::check_on_board(to)?;
        let distance = match (from, to) {
            (Position::Off, _) => Err(MoveError::FromOff),
            (_, Position::Bar) => Err(MoveError::ToBar),
            (Position::Bar, Position::Off) => Err(MoveError::BarToOff(color)),
            (Position::Bar, Position::Board(to)) => match color {
                Color::White if to >= 18 => Ok(24 - to),
                Color::Black if to <= 5 => Ok(to + 1),
                _ => Err(MoveError::InvalidEntry { color, to: to as usize }),
            },
            (Position::Board(from), Position::Off) => match color {
                Color::White => Ok(from + 1),
                Color::Black => Ok(24 - from),
            },
            (Position::Board(from), Position::Board(to)) => match color {
                _ if from == to => Err(MoveError::SamePoint),
                Color::White if to < from => Ok(from - to),
                Color::Black if to > from => Ok(to - from),
                _ => Err(MoveError::Backward {
                    color,
                    from: from as usize,
                    to: to as usize,
                }),
            },
        };
        distance.map_err(GameError::from)
    }

    fn check_on_board(position: Position) -> Result<(), GameError> {
        match position {
            Position::Board(index) if index as usize >= POINTS => Err(GameError::OutOfRange(index as i32)),
            _ => Ok(()),
        }
    }

    /// Validates a move for the active player without applying it.
    fn plan(&self, from: Position, to: Position, distance: Option<u8>) -> Result<HalfMove, GameError> {
        self.ensure_in_progress()?;
        Self::check_on_board(from)?;
        Self::check_on_board(to)?;
        if from == to {
            return Err(MoveError::SamePoint.into());
        }
        let color = self.turn;

        if self.board.count_at_bar(color) > 0 && from != Position::Bar {
            return Err(MoveError::BarNotCleared(color).into());
        }
        match from {
            Position::Bar if self.board.count_at_bar(color) == 0 => {
                return Err(MoveError::EmptyBar(color).into());
            }
            Position::Off => return Err(MoveError::FromOff.into()),
            Position::Board(index) => {
                let index = index as usize;
                match self.board.point_at(index)?.color {
                    None => return Err(MoveError::EmptySource(index).into()),
                    Some(owner) if owner != color => {
                        return Err(MoveError::WrongColor { index, owner, mover: color }.into());
                    }
                    Some(_) => {}
                }
            }
            Position::Bar => {}
        }

        let required = Self::calculate_distance(from, to, color)?;
        let bearing_off = to == Position::Off;
        if let Some(actual) = distance {
            let covers = if bearing_off { actual >= required } else { actual == required };
            if !covers {
                return Err(MoveError::DistanceMismatch { expected: required, actual }.into());
            }
        }

        let hit = match to {
            Position::Off if !self.can_bear_off(color) => {
                return Err(MoveError::CannotBearOff(color).into());
            }
            Position::Off => false,
            Position::Bar => return Err(MoveError::ToBar.into()),
            Position::Board(index) => {
                let index = index as usize;
                let point = self.board.point_at(index)?;
                if point.blocks(color) {
                    return Err(MoveError::Blocked { index, owner: color.opposite() }.into());
                }
                point.is_blot_for(color)
            }
        };

        let die = match distance {
            Some(actual) if self.dice.is_available(actual) => actual,
            Some(actual) => return Err(MoveError::DieUnavailable(actual).into()),
            None if bearing_off => self
                .dice
                .smallest_at_least(required)
                .ok_or(MoveError::DieUnavailable(required))?,
            None if self.dice.is_available(required) => required,
            None => return Err(MoveError::DieUnavailable(required).into()),
        };

        Ok(HalfMove::new(from, to, die, hit))
    }

    // Only called with a move `plan` accepted, so none of these steps fail.
    fn apply(&mut self, half_move: HalfMove) -> Result<(), GameError> {
        let color = self.turn;
        match half_move.from() {
            Position::Bar => self.board.remove_from_bar(color)?,
            Position::Board(index) => {
                self.board.remove_checker(index as usize)?;
            }
            Position::Off => return Err(MoveError::FromOff.into()),
        }
        match half_move.to() {
            Position::Off => self.borne_off[color.index()] += 1,
            Position::Board(index) => {
                let index = index as usize;
                if half_move.is_hit() {
                    let hit = self.board.remove_checker(index)?;
                    self.board.send_to_bar(hit);
                    debug!(point = index + 1, color = %hit, "checker hit");
                }
                self.board.add_checker(color, index)?;
            }
            Position::Bar => return Err(MoveError::ToBar.into()),
        }
        self.dice.consume(half_move.die())?;
        Ok(())
    }

    fn check_winner(&mut self) {
        self.outcome = self.evaluate_outcome();
        if let Some(winner) = self.outcome.winner() {
            info!(winner = %winner, points = self.outcome.points(), outcome = ?self.outcome, "game finished");
        }
    }

    /// Outcome implied by the current position and borne-off counters.
    ///
    /// A color with no checkers on the board or the bar has won. The
    /// category is read from the loser: nothing borne off and a checker on
    /// the bar or in the winner's home quadrant is a backgammon, nothing
    /// borne off otherwise a gammon, anything else a single game.
    pub fn evaluate_outcome(&self) -> GameOutcome {
        let winner = [self.turn, self.turn.opposite()]
            .into_iter()
            .find(|&color| self.board.checkers_in_play(color) == 0);
        let Some(winner) = winner else {
            return GameOutcome::Ongoing;
        };

        let loser = winner.opposite();
        if self.borne_off[loser.index()] > 0 {
            GameOutcome::Win(winner)
        } else if self.board.count_at_bar(loser) > 0
            || self.board.checkers_in(loser, winner.home_quadrant()) > 0
        {
            GameOutcome::Backgammon(winner)
        } else {
            GameOutcome::Gammon(winner)
        }
    }

    /// Swaps the active player and drops the dice. Ignored once the game is over.
    pub fn change_turn(&mut self) {
        if self.is_finished() {
            debug!("turn change ignored, the game is over");
            return;
        }
        self.turn = self.turn.opposite();
        self.dice.clear();
        debug!(player = %self.turn, "turn changed");
    }

    /// True when `color` has nothing on the bar and every checker inside its home quadrant.
    pub fn can_bear_off(&self, color: Color) -> bool {
        self.board.count_at_bar(color) == 0
            && self.board.checkers_in(color, color.home_quadrant()) == self.board.checkers_on_board(color)
    }

    /// Every single-checker move the active player can make with the dice showing.
    pub fn legal_moves(&self) -> Vec<HalfMove> {
        if self.is_finished() {
            return Vec::new();
        }
        let color = self.turn;
        let sources: Vec<Position> = if self.board.count_at_bar(color) > 0 {
            vec![Position::Bar]
        } else {
            self.board
                .points_occupied_by(color)
                .into_iter()
                .map(Position::from_index)
                .collect()
        };

        let mut moves = Vec::new();
        for die in self.dice.unique_available() {
            for &from in sources.iter() {
                let Some(to) = Self::target(from, die, color) else {
                    continue;
                };
                if let Ok(half_move) = self.plan(from, to, Some(die)) {
                    moves.push(half_move);
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    fn target(from: Position, die: u8, color: Color) -> Option<Position> {
        let die = die as i32;
        let index = match (from, color) {
            (Position::Bar, Color::White) => 24 - die,
            (Position::Bar, Color::Black) => die - 1,
            (Position::Board(i), Color::White) => i as i32 - die,
            (Position::Board(i), Color::Black) => i as i32 + die,
            (Position::Off, _) => return None,
        };
        match from {
            _ if (0..24).contains(&index) => Some(Position::Board(index as u8)),
            Position::Board(_) => Some(Position::Off),
            _ => None,
        }
    }

    /// Pips `color` still has to travel; checkers on the bar count 25.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_board: u32 = self
            .board
            .points()
            .iter()
            .enumerate()
            .filter(|(_, point)| point.is_owned_by(color))
            .map(|(i, point)| {
                let distance = match color {
                    Color::White => i as u32 + 1,
                    Color::Black => 24 - i as u32,
                };
                distance * point.count as u32
            })
            .sum();
        on_board + 25 * self.board.count_at_bar(color) as u32
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn point_at(&self, index: usize) -> Result<Point, GameError> {
        self.board
            .point_at(index)
            .map_err(|_| GameError::OutOfRange(i32::try_from(index).unwrap_or(i32::MAX)))
    }

    pub fn bar_count(&self, color: Color) -> u8 {
        self.board.count_at_bar(color)
    }

    pub fn borne_off(&self, color: Color) -> u8 {
        self.borne_off[color.index()]
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.turn)
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn available_distances(&self) -> Vec<u8> {
        self.dice.available()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<&Player> {
        self.outcome.winner().map(|color| self.player(color))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            points: self.board.points().to_vec(),
            bar: ColorCounts {
                white: self.bar_count(Color::White),
                black: self.bar_count(Color::Black),
            },
            borne_off: ColorCounts {
                white: self.borne_off(Color::White),
                black: self.borne_off(Color::Black),
            },
            turn: self.turn,
            current_player: self.current_player().name().to_string(),
            dice: self.available_distances(),
            outcome: self.outcome,
        }
    }
}
