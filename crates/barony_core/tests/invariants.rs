//! Property tests: arbitrary rosters and decisions never break the limits.

use barony_core::prelude::*;
use barony_test_utils::determinism::strategies::{arb_baronies, arb_game_intents};
use barony_test_utils::determinism::{run_parallel_games, verify_game_determinism};
use barony_test_utils::fixtures::{
    assert_ranks_consistent, assert_within_limits, play_out, Raider,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_limits_hold_for_any_decisions(
        baronies in arb_baronies(),
        intents in arb_game_intents(TURNS as usize),
    ) {
        let mut game = Game::with_baronies(baronies);
        for turn_intents in &intents {
            for id in BaronyId::all() {
                let decisions = turn_intents[id.index()].decisions(&game, id);
                prop_assert!(game.apply_decisions(id, &decisions).is_ok());
            }
            game.process_turn();
            assert_within_limits(&game);
            assert_ranks_consistent(&game);
        }
        prop_assert!(game.turn() <= TURNS);
    }

    #[test]
    fn prop_quiet_turn_keeps_land(baronies in arb_baronies()) {
        let mut game = Game::with_baronies(baronies.clone());
        game.process_turn();
        for (before, after) in baronies.iter().zip(game.baronies()) {
            prop_assert_eq!(before.land, after.land);
        }
        assert_within_limits(&game);
    }
}

#[test]
fn raiding_game_stays_within_limits() {
    let mut game = Game::new();
    let hashes = play_out(&mut game, &mut Raider);
    assert_eq!(hashes.len(), TURNS as usize);
    assert_within_limits(&game);
    assert_ranks_consistent(&game);
}

#[test]
fn full_games_are_reproducible() {
    assert!(verify_game_determinism(Game::new, || Raider));
    run_parallel_games(Game::new, || Raider, 4).assert_deterministic();
}
