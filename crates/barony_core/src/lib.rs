//! # Barony Core
//!
//! Deterministic turn resolution for a game of eight feudal baronies.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No randomness
//! - No floating-point math (fractions are exact integer ratios)
//!
//! This separation enables:
//! - Terminal, headless and networked front ends over the same rules
//! - Seeded, reproducible computer opponents living outside the core
//! - Determinism testing
//!
//! ## Crate Structure
//!
//! - [`game`] - The turn orchestrator and submission API
//! - [`barony`] - Barony identifiers and state
//! - [`production`] - Paying for and delivering orders
//! - [`combat`] - Battle resolution
//! - [`economy`] - Migration, tax, upkeep and desertion
//! - [`ranking`] - Standings by land
//! - [`decision`] - The seam for whoever decides each barony's turn
//! - [`math`] - Exact fractions

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod attack;
pub mod barony;
pub mod combat;
pub mod decision;
pub mod economy;
pub mod error;
pub mod game;
pub mod math;
pub mod order;
pub mod production;
pub mod ranking;
pub mod report;
pub mod rules;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attack::Attack;
    pub use crate::barony::{Barony, BaronyId, ControllerKind, ROSTER};
    pub use crate::decision::{AttackPlan, DecisionSource, Passive, TurnDecisions};
    pub use crate::error::{GameError, Result, Troop};
    pub use crate::game::{Game, TurnOutcome};
    pub use crate::math::Fraction;
    pub use crate::order::{Order, Units};
    pub use crate::report::{BattleReport, Report};
    pub use crate::rules::{BARONIES, TURNS};
}
