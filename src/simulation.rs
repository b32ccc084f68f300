//! Random self-play. Each game picks uniformly among the legal moves until
//! the dice are spent or nothing is playable, then passes the turn.

use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::backgammon::{Color, Game, GameError, GameOutcome, HalfMove};

/// Turns after which a game is abandoned as unfinished.
pub const MAX_TURNS: u32 = 10_000;

/// Results of a batch of games, indexed by [`Color::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub games: u32,
    pub unfinished: u32,
    pub wins: [u32; 2],
    pub gammons: [u32; 2],
    pub backgammons: [u32; 2],
}

impl Tally {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Ongoing => self.unfinished += 1,
            GameOutcome::Win(color) => self.wins[color.index()] += 1,
            GameOutcome::Gammon(color) => self.gammons[color.index()] += 1,
            GameOutcome::Backgammon(color) => self.backgammons[color.index()] += 1,
        }
    }

    pub fn total_wins(&self, color: Color) -> u32 {
        let i = color.index();
        self.wins[i] + self.gammons[i] + self.backgammons[i]
    }

    /// Points scored by `color` over all games.
    pub fn points(&self, color: Color) -> u32 {
        let i = color.index();
        self.wins[i] + 2 * self.gammons[i] + 3 * self.backgammons[i]
    }

    pub fn win_rate(&self, color: Color) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_wins(color) as f32 / self.games as f32 * 100.0
    }
}

pub fn choose_random_move<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<HalfMove> {
    game.legal_moves().choose(rng).copied()
}

/// Plays one game with random moves. The same seed replays the same game.
pub fn play_random_game(seed: u64) -> Result<GameOutcome, GameError> {
    let mut game = Game::with_seed("White", "Black", seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(0x9E3779B97F4A7C15));

    for _ in 0..MAX_TURNS {
        game.roll_dice()?;
        while let Some(half_move) = choose_random_move(&game, &mut rng) {
            game.play(half_move.from(), half_move.to(), Some(half_move.die()))?;
            if game.is_finished() {
                return Ok(game.outcome());
            }
        }
        game.change_turn();
    }

    debug!(seed, "game abandoned after {} turns", MAX_TURNS);
    Ok(game.outcome())
}

/// Plays `games` random games in parallel, seeded `seed`, `seed + 1`, ...
pub fn simulate(games: u32, seed: u64) -> Result<Tally, GameError> {
    let outcomes = (0..games)
        .into_par_iter()
        .map(|i| play_random_game(seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut tally = Tally::default();
    for outcome in outcomes {
        tally.record(outcome);
    }
    info!(games = tally.games, unfinished = tally.unfinished, "simulation finished");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_game() {
        assert_eq!(play_random_game(5).unwrap(), play_random_game(5).unwrap());
    }

    #[test]
    fn test_random_games_finish() {
        for seed in 0..5 {
            let outcome = play_random_game(seed).unwrap();
            assert!(outcome.is_finished(), "seed {} did not finish", seed);
        }
    }

    #[test]
    fn test_simulate() {
        let tally = simulate(16, 1).unwrap();
        assert_eq!(tally.games, 16);
        assert_eq!(tally.unfinished, 0);
        assert_eq!(tally.total_wins(Color::White) + tally.total_wins(Color::Black), 16);
        assert_eq!(tally, simulate(16, 1).unwrap());
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        tally.record(GameOutcome::Win(Color::White));
        tally.record(GameOutcome::Gammon(Color::White));
        tally.record(GameOutcome::Backgammon(Color::Black));
        tally.record(GameOutcome::Ongoing);
        assert_eq!(tally.games, 4);
        assert_eq!(tally.unfinished, 1);
        assert_eq!(tally.total_wins(Color::White), 2);
        assert_eq!(tally.points(Color::White), 3);
        assert_eq!(tally.points(Color::Black), 3);
        assert_eq!(tally.win_rate(Color::Black), 25.0);
    }
}
