//! Build and recruitment orders.

use serde::{Deserialize, Serialize};

use crate::barony::BaronyId;
use crate::rules::{CASTLE_COST, FOOTMAN_COST, KNIGHT_COST};

/// A count of castles, knights and footmen.
///
/// Used both for what an order asks for and for the unit records in a
/// report (delivered, not delivered, lost to attrition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Units {
    /// Castles.
    pub castles: i32,
    /// Knights.
    pub knights: i32,
    /// Footmen.
    pub footmen: i32,
}

impl Units {
    /// Create a unit count.
    #[must_use]
    pub const fn new(castles: i32, knights: i32, footmen: i32) -> Self {
        Self {
            castles,
            knights,
            footmen,
        }
    }

    /// No units at all.
    pub const NONE: Self = Self::new(0, 0, 0);

    /// Whether every count is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.castles == 0 && self.knights == 0 && self.footmen == 0
    }

    /// Whether any count is negative.
    #[must_use]
    pub const fn has_negative(&self) -> bool {
        self.castles < 0 || self.knights < 0 || self.footmen < 0
    }
}

/// A purchase of units placed by a barony for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Barony that placed the order.
    pub barony: BaronyId,
    /// Units requested.
    pub units: Units,
    /// Set once population and gold have been taken for the order.
    pub paid: bool,
}

impl Order {
    /// Create an unpaid order.
    #[must_use]
    pub const fn new(barony: BaronyId, units: Units) -> Self {
        Self {
            barony,
            units,
            paid: false,
        }
    }

    /// Cost of the order in population.
    ///
    /// Widened to `i64` so that no accepted order can overflow.
    #[must_use]
    pub const fn population_cost(&self) -> i64 {
        units_cost(&self.units)
    }

    /// Cost of the order in gold.
    ///
    /// Currently identical to [`population_cost`](Self::population_cost);
    /// the two are kept separate so either can be rebalanced alone.
    #[must_use]
    pub const fn gold_cost(&self) -> i64 {
        units_cost(&self.units)
    }
}

const fn units_cost(units: &Units) -> i64 {
    units.castles as i64 * CASTLE_COST as i64
        + units.knights as i64 * KNIGHT_COST as i64
        + units.footmen as i64 * FOOTMAN_COST as i64
}
