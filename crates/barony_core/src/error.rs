//! Error types for submitting decisions to a game.
//!
//! Turn resolution itself never fails: unaffordable orders, desertion and
//! caps are modeled outcomes recorded in reports. These errors only guard the
//! submission seam used by decision sources.

use thiserror::Error;

use crate::barony::BaronyId;
use crate::rules::BARONIES;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Which kind of troop an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Troop {
    /// Mounted knights.
    Knights,
    /// Foot soldiers.
    Footmen,
}

impl std::fmt::Display for Troop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Knights => f.write_str("knights"),
            Self::Footmen => f.write_str("footmen"),
        }
    }
}

/// Top-level error type for all game errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Barony index outside the fixed roster.
    #[error("Invalid barony index {0}: the roster has {n} baronies", n = BARONIES)]
    InvalidBarony(usize),

    /// A barony tried to attack itself.
    #[error("Barony {0} cannot attack itself")]
    SelfAttack(BaronyId),

    /// An order or attack carried a negative count.
    #[error("Quantities must not be negative")]
    NegativeQuantity,

    /// An attack would send more troops than the barony has left at home.
    #[error("Insufficient {unit}: requested {requested}, available {available}")]
    InsufficientForces {
        /// Troop type.
        unit: Troop,
        /// Amount requested.
        requested: i32,
        /// Amount available.
        available: i32,
    },

    /// The game has already played its final turn.
    #[error("The game is over")]
    GameOver,

    /// Barony names are limited in length.
    #[error("Barony name too long: {0:?}")]
    NameTooLong(String),
}
