//! Attacks committed by one barony against another.

use serde::{Deserialize, Serialize};

use crate::barony::BaronyId;
use crate::rules::KNIGHT_STRENGTH;

/// Forces sent by `origin` against `target` this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attack {
    /// Barony sending the forces.
    pub origin: BaronyId,
    /// Barony under attack.
    pub target: BaronyId,
    /// Knights sent.
    pub knights: i32,
    /// Footmen sent.
    pub footmen: i32,
}

impl Attack {
    /// Create an attack.
    #[must_use]
    pub const fn new(origin: BaronyId, target: BaronyId, knights: i32, footmen: i32) -> Self {
        Self {
            origin,
            target,
            knights,
            footmen,
        }
    }

    /// Raw fighting strength of the attack, in footmen.
    #[must_use]
    pub const fn strength(&self) -> i64 {
        self.knights as i64 * KNIGHT_STRENGTH + self.footmen as i64
    }

    /// Whether the attack sends nobody.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.knights == 0 && self.footmen == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> BaronyId {
        BaronyId::new(index).unwrap()
    }

    #[test]
    fn test_strength_weights_knights() {
        let attack = Attack::new(id(0), id(1), 200, 35);
        assert_eq!(attack.strength(), 2035);
    }

    #[test]
    fn test_empty_attack() {
        assert!(Attack::new(id(2), id(3), 0, 0).is_empty());
        assert!(!Attack::new(id(2), id(3), 0, 1).is_empty());
    }
}
