//! Test fixtures and helpers.
//!
//! Pre-built game states, a deterministic opponent and invariant checks
//! for consistent testing.

use barony_core::prelude::*;
use barony_core::rules::{MAX_CASTLES, MAX_FOOTMEN, MAX_GOLD, MAX_KNIGHTS};

/// Identifier for a roster index.
///
/// # Panics
///
/// Panics if `index` is outside the roster.
#[must_use]
pub fn barony(index: usize) -> BaronyId {
    BaronyId::roster()[index]
}

/// A fresh game with the standard roster.
#[must_use]
pub fn fresh_game() -> Game {
    Game::new()
}

/// The standard roster at its starting values.
#[must_use]
pub fn fresh_baronies() -> [Barony; BARONIES] {
    Game::new().baronies().clone()
}

/// A fresh game with some baronies adjusted before the first turn.
#[must_use]
pub fn game_with(adjust: impl FnOnce(&mut [Barony; BARONIES])) -> Game {
    let mut baronies = fresh_baronies();
    adjust(&mut baronies);
    Game::with_baronies(baronies)
}

/// Strip a barony down to no castles and a token 40 footmen.
pub fn undefended(barony: &mut Barony) {
    barony.castles = 0;
    barony.footmen = 40;
}

/// Leave a barony owing 500 gold of upkeep with only 100 to pay it.
///
/// Population and land are zeroed so no tax arrives first.
pub fn overextended(barony: &mut Barony) {
    barony.land = 0;
    barony.population = 0;
    barony.gold = 100;
    barony.castles = 40;
    barony.knights = 100;
    barony.footmen = 0;
}

/// Deterministic opponent used by determinism and invariant tests.
///
/// Orders like the computer opponent does and, every turn, raids a
/// neighbour further along the roster with half of what it could send.
/// The neighbour rotates with the turn so every pairing is eventually
/// fought.
#[derive(Debug, Clone, Copy, Default)]
pub struct Raider;

impl DecisionSource for Raider {
    fn decide(&mut self, game: &Game, id: BaronyId) -> TurnDecisions {
        let gold = game.barony(id).gold;
        let offset = (game.turn() as usize % (BARONIES - 1)) + 1;
        let target = barony((id.index() + offset) % BARONIES);

        TurnDecisions {
            order: Some(Units::new(gold / 400, gold / 40, gold / 8)),
            attacks: vec![AttackPlan::new(
                target,
                game.max_knights_to_send(id, target) / 2,
                game.max_footmen_to_send(id, target) / 2,
            )],
        }
    }
}

/// Collect and submit every barony's decisions, then resolve the turn.
///
/// A barony whose decisions are rejected keeps whatever was submitted
/// before the rejection.
pub fn play_turn(game: &mut Game, source: &mut dyn DecisionSource) -> Option<TurnOutcome> {
    for id in BaronyId::all() {
        let decisions = source.decide(game, id);
        if let Err(error) = game.apply_decisions(id, &decisions) {
            tracing::warn!(barony = %id, %error, "Decisions rejected");
        }
    }
    game.process_turn()
}

/// Play turns until the game is complete, returning the state hash after each.
pub fn play_out(game: &mut Game, source: &mut dyn DecisionSource) -> Vec<u64> {
    let mut hashes = Vec::new();
    while play_turn(game, source).is_some() {
        hashes.push(game.state_hash());
    }
    hashes
}

/// Assert every barony's quantities lie within their permitted ranges.
///
/// # Panics
///
/// Panics naming the first barony and quantity out of range.
pub fn assert_within_limits(game: &Game) {
    for barony in game.baronies() {
        let name = &barony.name;
        assert!(barony.land >= 0, "{name} land {} < 0", barony.land);
        assert!(
            barony.population >= 0,
            "{name} population {} < 0",
            barony.population
        );
        assert!(
            (0..=MAX_GOLD).contains(&barony.gold),
            "{name} gold {} out of range",
            barony.gold
        );
        assert!(
            (0..=MAX_CASTLES).contains(&barony.castles),
            "{name} castles {} out of range",
            barony.castles
        );
        assert!(
            (0..=MAX_KNIGHTS).contains(&barony.knights),
            "{name} knights {} out of range",
            barony.knights
        );
        assert!(
            (0..=MAX_FOOTMEN).contains(&barony.footmen),
            "{name} footmen {} out of range",
            barony.footmen
        );
    }
}

/// Assert ranks agree with land: more land never ranks worse, equal land
/// ranks equal, and the leader ranks first.
///
/// # Panics
///
/// Panics on the first pair of baronies whose ranks contradict their land.
pub fn assert_ranks_consistent(game: &Game) {
    let standings = game.standings();
    assert_eq!(standings[0].rank, 1, "leader must rank first");

    for (position, pair) in standings.windows(2).enumerate() {
        let (ahead, behind) = (pair[0], pair[1]);
        if ahead.land == behind.land {
            assert_eq!(ahead.rank, behind.rank, "{} and {} tie", ahead.name, behind.name);
        } else {
            assert_eq!(
                behind.rank,
                position as u32 + 2,
                "{} should take its position",
                behind.name
            );
        }
    }
}
