//! The computer opponent.
//!
//! Every turn a computer barony spends on a fixed mix of castles, knights
//! and footmen scaled to its treasury, then picks a barony at random and
//! sends half its knights and half its footmen against it. Drawing itself
//! means it stays home that turn.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barony_core::prelude::*;

/// Gold per castle ordered.
const GOLD_PER_CASTLE: i32 = 400;
/// Gold per knight ordered.
const GOLD_PER_KNIGHT: i32 = 40;
/// Gold per footman ordered.
const GOLD_PER_FOOTMAN: i32 = 8;

/// A seeded computer player.
///
/// Each barony draws from its own ChaCha stream, so one barony's choices
/// never shift another's.
#[derive(Debug, Clone)]
pub struct ComputerOpponent {
    rng: ChaCha8Rng,
}

impl ComputerOpponent {
    /// Create the opponent for `barony` in a game seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64, barony: BaronyId) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(barony.index() as u64);
        Self { rng }
    }
}

impl DecisionSource for ComputerOpponent {
    fn decide(&mut self, game: &Game, barony: BaronyId) -> TurnDecisions {
        let own = game.barony(barony);
        let order = Units::new(
            own.gold / GOLD_PER_CASTLE,
            own.gold / GOLD_PER_KNIGHT,
            own.gold / GOLD_PER_FOOTMAN,
        );

        let draw = self.rng.gen_range(0..BARONIES);
        let attacks = match BaronyId::new(draw) {
            Ok(target) if target != barony => {
                vec![AttackPlan::new(target, own.knights / 2, own.footmen / 2)]
            }
            _ => Vec::new(),
        };

        tracing::debug!(
            barony = %own.name,
            draw,
            castles = order.castles,
            knights = order.knights,
            footmen = order.footmen,
            "Computer decided"
        );

        TurnDecisions {
            order: Some(order),
            attacks,
        }
    }
}
