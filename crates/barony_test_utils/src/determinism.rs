//! Determinism testing utilities.
//!
//! Provides a harness for verifying that games produce identical results
//! given identical decisions.
//!
//! # Testing Strategy
//!
//! Turn resolution must be 100% deterministic so that a seeded headless
//! game can be replayed exactly. Sources of non-determinism include:
//!
//! - **Floating-point math**: Battle and desertion fractions use exact
//!   integer ratios via [`barony_core::math::Fraction`].
//!
//! - **Iteration order**: Baronies are always walked in roster order, and
//!   all per-barony state lives in fixed arrays.
//!
//! - **System randomness**: The core never draws random numbers; opponents
//!   that do are seeded explicitly.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual resolvers (economy, combat, ranking)
//! 2. **Property tests**: Random states and decisions stay within limits
//! 3. **Integration tests**: Full games are reproducible
//! 4. **Parallel tests**: Running N games in parallel all match

use std::collections::BTreeSet;
use std::thread;

use barony_core::decision::DecisionSource;
use barony_core::game::Game;

use crate::fixtures::play_turn;

/// Final state hashes from repeated runs of the same game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether every run ended in the same state.
    pub is_deterministic: bool,
    /// Final hash of each run, in run order.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        let is_deterministic = hashes.windows(2).all(|pair| pair[0] == pair[1]);
        Self {
            is_deterministic,
            hashes,
        }
    }

    /// Assert that every run ended in the same state.
    ///
    /// # Panics
    ///
    /// Panics listing the distinct final hashes.
    pub fn assert_deterministic(&self) {
        let distinct: BTreeSet<u64> = self.hashes.iter().copied().collect();
        assert!(
            self.is_deterministic,
            "{} runs ended in {} distinct states: {distinct:?}",
            self.hashes.len(),
            distinct.len()
        );
    }
}

/// Run a stepped process multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute state hash
///
/// # Example
///
/// ```
/// use barony_test_utils::determinism::verify_determinism;
/// use barony_core::game::Game;
///
/// let result = verify_determinism(
///     3,
///     12,
///     Game::new,
///     |game| {
///         game.process_turn();
///     },
///     Game::state_hash,
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut state = setup();
            for _ in 0..steps {
                step(&mut state);
            }
            hash(&state)
        })
        .collect();

    DeterminismResult::from_hashes(hashes)
}

/// Play a full game twice with fresh decision sources and compare.
///
/// # Returns
///
/// `true` if both games ended in identical states.
pub fn verify_game_determinism<G, D, S>(setup_fn: G, source_fn: D) -> bool
where
    G: Fn() -> Game,
    D: Fn() -> S,
    S: DecisionSource,
{
    let result = verify_determinism(
        2,
        1,
        || (setup_fn(), source_fn()),
        |(game, source)| while play_turn(game, source).is_some() {},
        |(game, _)| game.state_hash(),
    );
    result.is_deterministic
}

/// Play `num_games` games to completion on scoped threads, one game per
/// thread, and collect their final hashes.
///
/// # Panics
///
/// Panics if a game thread panicked.
pub fn run_parallel_games<G, D, S>(
    setup_fn: G,
    source_fn: D,
    num_games: usize,
) -> DeterminismResult
where
    G: Fn() -> Game + Sync,
    D: Fn() -> S + Sync,
    S: DecisionSource,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_games)
            .map(|_| {
                s.spawn(|| {
                    let mut game = setup_fn();
                    let mut source = source_fn();
                    while play_turn(&mut game, &mut source).is_some() {}
                    game.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("game thread panicked"))
            .collect()
    });

    DeterminismResult::from_hashes(hashes)
}

/// Compare two games turn by turn, finding the first divergence.
///
/// Useful for debugging non-determinism by finding exactly when games
/// start to differ.
///
/// # Returns
///
/// The turn after which the states first differed (0 for the initial
/// state), or `None` if they never did.
pub fn find_first_divergence<G, D, S>(setup_fn: G, source_fn: D) -> Option<u32>
where
    G: Fn() -> Game,
    D: Fn() -> S,
    S: DecisionSource,
{
    let (mut game1, mut source1) = (setup_fn(), source_fn());
    let (mut game2, mut source2) = (setup_fn(), source_fn());

    if game1.state_hash() != game2.state_hash() {
        return Some(0);
    }

    loop {
        let first = play_turn(&mut game1, &mut source1);
        let second = play_turn(&mut game2, &mut source2);
        if first.is_none() && second.is_none() {
            return None;
        }
        if first != second || game1.state_hash() != game2.state_hash() {
            return Some(game1.turn().max(game2.turn()));
        }
    }
}

/// Verify that a RON round trip preserves game state exactly.
///
/// Runs `turns` turns with `source` first, so pending decisions and reports
/// are included.
pub fn verify_serialization_determinism(
    mut game: Game,
    source: &mut dyn DecisionSource,
    turns: u32,
) -> bool {
    for _ in 0..turns {
        play_turn(&mut game, source);
    }

    let hash_before = game.state_hash();

    let Ok(text) = ron::to_string(&game) else {
        return false;
    };
    let Ok(restored) = ron::from_str::<Game>(&text) else {
        return false;
    };

    restored == game && restored.state_hash() == hash_before
}

/// Property-based testing strategies.
pub mod strategies {
    use barony_core::prelude::*;
    use barony_core::rules::{MAX_CASTLES, MAX_FOOTMEN, MAX_GOLD, MAX_KNIGHTS};
    use proptest::prelude::*;

    /// Generate a barony anywhere within the permitted ranges.
    pub fn arb_barony() -> impl Strategy<Value = Barony> {
        (
            0i32..20_000,
            0i32..20_000,
            0..=MAX_GOLD,
            0..=MAX_CASTLES,
            0..=MAX_KNIGHTS,
            0..=MAX_FOOTMEN,
        )
            .prop_map(|(land, population, gold, castles, knights, footmen)| {
                let mut barony = crate::fixtures::fresh_baronies()[0].clone();
                barony.land = land;
                barony.population = population;
                barony.gold = gold;
                barony.castles = castles;
                barony.knights = knights;
                barony.footmen = footmen;
                barony
            })
    }

    /// Generate a full roster of arbitrary baronies.
    pub fn arb_baronies() -> impl Strategy<Value = [Barony; BARONIES]> {
        proptest::array::uniform8(arb_barony()).prop_map(|mut baronies| {
            for (barony, name) in baronies.iter_mut().zip(ROSTER) {
                barony.name = name.to_string();
            }
            baronies
        })
    }

    /// Generate an order of up to `max` of each unit.
    pub fn arb_units(max: i32) -> impl Strategy<Value = Units> {
        (0..=max / 10, 0..=max, 0..=max)
            .prop_map(|(castles, knights, footmen)| Units::new(castles, knights, footmen))
    }

    /// What one barony wants to do, relative to what it can afford to send.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Intent {
        /// Units to order.
        pub order: Units,
        /// Roster index to attack; ignored when it is the barony itself.
        pub target: usize,
        /// Percentage of sendable knights to commit.
        pub knights_pct: i32,
        /// Percentage of sendable footmen to commit.
        pub footmen_pct: i32,
    }

    impl Intent {
        /// Turn this intent into decisions valid for `barony` in `game`.
        #[must_use]
        pub fn decisions(&self, game: &Game, barony: BaronyId) -> TurnDecisions {
            let target = BaronyId::roster()[self.target % BARONIES];
            let attacks = if target == barony {
                Vec::new()
            } else {
                vec![AttackPlan::new(
                    target,
                    game.max_knights_to_send(barony, target) * self.knights_pct / 100,
                    game.max_footmen_to_send(barony, target) * self.footmen_pct / 100,
                )]
            };
            TurnDecisions {
                order: Some(self.order),
                attacks,
            }
        }
    }

    /// Generate one barony's intent.
    pub fn arb_intent() -> impl Strategy<Value = Intent> {
        (arb_units(500), 0..BARONIES, 0i32..=100, 0i32..=100).prop_map(
            |(order, target, knights_pct, footmen_pct)| Intent {
                order,
                target,
                knights_pct,
                footmen_pct,
            },
        )
    }

    /// Generate intents for every barony for one turn.
    pub fn arb_turn_intents() -> impl Strategy<Value = [Intent; BARONIES]> {
        proptest::array::uniform8(arb_intent())
    }

    /// Generate intents for a run of turns.
    pub fn arb_game_intents(max_turns: usize) -> impl Strategy<Value = Vec<[Intent; BARONIES]>> {
        proptest::collection::vec(arb_turn_intents(), 1..=max_turns)
    }
}
