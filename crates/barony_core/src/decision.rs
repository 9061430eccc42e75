//! The seam between the engine and whoever decides what baronies do.
//!
//! Human players, the computer opponent and any scripted stand-in all
//! produce the same [`TurnDecisions`] through the same [`DecisionSource`]
//! trait, so the engine never needs to know who is deciding. The only
//! difference between controllers is who (or what) makes the decisions.

use serde::{Deserialize, Serialize};

use crate::barony::BaronyId;
use crate::game::Game;
use crate::order::Units;

/// Forces a barony plans to send against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPlan {
    /// Barony to attack.
    pub target: BaronyId,
    /// Knights to send.
    pub knights: i32,
    /// Footmen to send.
    pub footmen: i32,
}

impl AttackPlan {
    /// Create an attack plan.
    #[must_use]
    pub const fn new(target: BaronyId, knights: i32, footmen: i32) -> Self {
        Self {
            target,
            knights,
            footmen,
        }
    }
}

/// Everything one barony wants to do this turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnDecisions {
    /// Units to build, if any.
    #[serde(default)]
    pub order: Option<Units>,
    /// Attacks to launch, at most one per target.
    #[serde(default)]
    pub attacks: Vec<AttackPlan>,
}

impl TurnDecisions {
    /// Decisions that do nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether these decisions do nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.map_or(true, |units| units.is_empty()) && self.attacks.is_empty()
    }
}

/// Something that decides a barony's orders and attacks each turn.
///
/// Implementations see the game read-only; the caller submits the returned
/// decisions with [`Game::apply_decisions`].
pub trait DecisionSource {
    /// Decide what `barony` does this turn.
    fn decide(&mut self, game: &Game, barony: BaronyId) -> TurnDecisions;
}

/// A decision source that never does anything.
///
/// Stands in for controllers whose decisions arrive by other means.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl DecisionSource for Passive {
    fn decide(&mut self, _game: &Game, _barony: BaronyId) -> TurnDecisions {
        TurnDecisions::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_decides_nothing() {
        let game = Game::new();
        let barony = BaronyId::new(3).unwrap();
        assert!(Passive.decide(&game, barony).is_empty());
    }

    #[test]
    fn test_empty_order_counts_as_nothing() {
        let decisions = TurnDecisions {
            order: Some(Units::NONE),
            attacks: Vec::new(),
        };
        assert!(decisions.is_empty());
    }
}
