use backgammon::{
    backgammon::{CHECKERS_PER_COLOR, Color, Game, Point},
    simulation::choose_random_move,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn assert_invariants(game: &Game) {
    for color in Color::ALL {
        let total = game.board().checkers_on_board(color)
            + u32::from(game.bar_count(color))
            + u32::from(game.borne_off(color));
        assert_eq!(total, u32::from(CHECKERS_PER_COLOR), "{} has {} checkers", color, total);
    }
    for point in game.board().points() {
        assert_eq!(Point::from_checkers(&point.checkers()), Ok(point));
        assert_eq!(point.count == 0, point.color.is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_play_keeps_invariants(seed in any::<u64>()) {
        let mut game = Game::with_seed("White", "Black", seed).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        assert_invariants(&game);

        for _ in 0..2_000 {
            if game.is_finished() {
                break;
            }
            game.roll_dice().unwrap();
            while let Some(half_move) = choose_random_move(&game, &mut rng) {
                let mover = game.turn();
                let bar_before = game.bar_count(mover);
                game.play(half_move.from(), half_move.to(), Some(half_move.die())).unwrap();
                assert_invariants(&game);
                if bar_before > 0 {
                    prop_assert_eq!(game.bar_count(mover), bar_before - 1);
                }
                if game.is_finished() {
                    break;
                }
            }
            game.change_turn();
        }

        prop_assert!(game.is_finished());
        let winner = game.outcome().winner().unwrap();
        prop_assert_eq!(game.borne_off(winner), CHECKERS_PER_COLOR);
        prop_assert_eq!(game.outcome(), game.evaluate_outcome());
    }

    #[test]
    fn rejected_moves_change_nothing(seed in any::<u64>(), from in -1i32..24, to in -1i32..24, die in 1u8..=6) {
        let mut game = Game::with_seed("White", "Black", seed).unwrap();
        game.roll_dice().unwrap();
        let before = game.snapshot();
        if game.move_checker(from, to, Some(die)).is_err() {
            prop_assert_eq!(game.snapshot(), before);
        } else {
            assert_invariants(&game);
        }
    }
}
