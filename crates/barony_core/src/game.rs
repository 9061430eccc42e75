//! Turn orchestration.
//!
//! A [`Game`] owns the eight baronies along with the orders, attacks and
//! reports of the turn in progress. Decisions are submitted through the
//! checked methods below, then [`Game::process_turn`] resolves every barony
//! at once in a fixed sequence of phases:
//!
//! 1. Clear last turn's reports
//! 2. Take payment for orders
//! 3. Dispatch attacking forces from their home garrisons
//! 4. Fight battles, then apply their outcomes
//! 5. Deliver paid orders
//! 6. Run the economy
//! 7. Rank by land
//!
//! # Determinism
//!
//! Resolution uses integer arithmetic only and walks baronies in roster
//! order, so the same decisions always produce the same game.
//!
//! # Example
//!
//! ```
//! use barony_core::barony::BaronyId;
//! use barony_core::game::Game;
//! use barony_core::order::Units;
//!
//! let mut game = Game::new();
//! let beaumont = BaronyId::new(0).unwrap();
//! let cavendish = BaronyId::new(1).unwrap();
//!
//! game.submit_order(beaumont, Units::new(10, 0, 0)).unwrap();
//! game.submit_attack(cavendish, beaumont, 200, 0).unwrap();
//!
//! let outcome = game.process_turn().unwrap();
//! assert_eq!(outcome.turn, 1);
//! assert_eq!(outcome.battles, 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::attack::Attack;
use crate::barony::{Barony, BaronyId, ControllerKind, ROSTER};
use crate::combat::{apply_battle, resolve_battle};
use crate::decision::TurnDecisions;
use crate::economy::{calculate_expenses, resolve_economy};
use crate::error::{GameError, Result, Troop};
use crate::order::{Order, Units};
use crate::production::{
    deliver, max_castles_to_buy, max_footmen_to_buy, max_knights_to_buy, take_payment, Delivery,
};
use crate::ranking::{calculate_rankings, standings_order};
use crate::report::Report;
use crate::rules::{BARONIES, TURNS};

/// Summary of one call to [`Game::process_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Number of the turn just resolved, starting at 1.
    pub turn: u32,
    /// Baronies that were attacked this turn.
    pub battles: usize,
    /// Whether that was the final turn.
    pub complete: bool,
}

/// A game of eight baronies over a fixed number of turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Turns resolved so far.
    turn: u32,
    baronies: [Barony; BARONIES],
    /// Pending orders, one per barony.
    orders: [Option<Order>; BARONIES],
    /// Pending attacks, indexed `[origin][target]`.
    attacks: [[Option<Attack>; BARONIES]; BARONIES],
    /// Reports from the last resolved turn.
    reports: [Option<Report>; BARONIES],
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a game with the standard roster, every barony computer-controlled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_baronies(std::array::from_fn(|index| Barony::founded(ROSTER[index])))
    }

    /// Start a game from given barony states.
    ///
    /// Useful for scenarios and tests; the turn counter starts at zero.
    #[must_use]
    pub fn with_baronies(baronies: [Barony; BARONIES]) -> Self {
        Self {
            turn: 0,
            baronies,
            orders: [None; BARONIES],
            attacks: [[None; BARONIES]; BARONIES],
            reports: std::array::from_fn(|_| None),
        }
    }

    /// Turns resolved so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Whether the final turn has been played.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.turn >= TURNS
    }

    /// Get a barony.
    #[must_use]
    pub fn barony(&self, id: BaronyId) -> &Barony {
        &self.baronies[id.index()]
    }

    /// All baronies in roster order.
    #[must_use]
    pub const fn baronies(&self) -> &[Barony; BARONIES] {
        &self.baronies
    }

    /// Hand a barony to a different controller.
    pub fn set_controller(&mut self, id: BaronyId, controller: ControllerKind) {
        self.baronies[id.index()].controller = controller;
    }

    /// The pending order for a barony, if any.
    #[must_use]
    pub fn order(&self, id: BaronyId) -> Option<&Order> {
        self.orders[id.index()].as_ref()
    }

    /// The pending attack from `origin` on `target`, if any.
    #[must_use]
    pub fn attack(&self, origin: BaronyId, target: BaronyId) -> Option<&Attack> {
        self.attacks[origin.index()][target.index()].as_ref()
    }

    /// Pending attacks made by `origin`, in target order.
    pub fn attacks_from(&self, origin: BaronyId) -> impl Iterator<Item = &Attack> {
        self.attacks[origin.index()].iter().flatten()
    }

    /// The last resolved turn's report for a barony.
    ///
    /// `None` before the first turn has been processed.
    #[must_use]
    pub fn report(&self, id: BaronyId) -> Option<&Report> {
        self.reports[id.index()].as_ref()
    }

    /// Reports from the last resolved turn, in roster order.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter().flatten()
    }

    /// Baronies from first to last by land.
    ///
    /// Baronies with equal land keep roster order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Barony> {
        standings_order(&self.baronies)
            .iter()
            .map(|id| &self.baronies[id.index()])
            .collect()
    }

    /// Upkeep a barony currently owes each turn.
    #[must_use]
    pub fn expenses(&self, id: BaronyId) -> i32 {
        calculate_expenses(self.barony(id))
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.is_complete() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Place, replace or clear a barony's order for this turn.
    ///
    /// An order for nothing clears any pending order. Affordability is not
    /// checked here; an order that cannot be paid for is reported as not
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] after the final turn and
    /// [`GameError::NegativeQuantity`] for negative counts.
    pub fn submit_order(&mut self, id: BaronyId, units: Units) -> Result<()> {
        self.ensure_in_progress()?;
        if units.has_negative() {
            return Err(GameError::NegativeQuantity);
        }

        self.orders[id.index()] = if units.is_empty() {
            None
        } else {
            Some(Order::new(id, units))
        };
        Ok(())
    }

    /// Withdraw a barony's pending order.
    pub fn cancel_order(&mut self, id: BaronyId) {
        self.orders[id.index()] = None;
    }

    /// Place, replace or clear an attack from `origin` on `target`.
    ///
    /// Sending nobody clears any pending attack on that target.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] after the final turn,
    /// [`GameError::SelfAttack`] when `origin` is `target`,
    /// [`GameError::NegativeQuantity`] for negative counts, and
    /// [`GameError::InsufficientForces`] when more troops are sent than are
    /// left after attacks on other targets.
    pub fn submit_attack(
        &mut self,
        origin: BaronyId,
        target: BaronyId,
        knights: i32,
        footmen: i32,
    ) -> Result<()> {
        self.ensure_in_progress()?;
        if origin == target {
            return Err(GameError::SelfAttack(origin));
        }
        if knights < 0 || footmen < 0 {
            return Err(GameError::NegativeQuantity);
        }

        let available = self.max_knights_to_send(origin, target);
        if knights > available {
            return Err(GameError::InsufficientForces {
                unit: Troop::Knights,
                requested: knights,
                available,
            });
        }
        let available = self.max_footmen_to_send(origin, target);
        if footmen > available {
            return Err(GameError::InsufficientForces {
                unit: Troop::Footmen,
                requested: footmen,
                available,
            });
        }

        let attack = Attack::new(origin, target, knights, footmen);
        self.attacks[origin.index()][target.index()] = if attack.is_empty() {
            None
        } else {
            Some(attack)
        };
        Ok(())
    }

    /// Call off a pending attack.
    pub fn cancel_attack(&mut self, origin: BaronyId, target: BaronyId) {
        self.attacks[origin.index()][target.index()] = None;
    }

    /// Submit everything a decision source chose for one barony.
    ///
    /// Stops at the first rejected decision; decisions before it stay
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns whichever error [`Game::submit_order`] or
    /// [`Game::submit_attack`] raised.
    pub fn apply_decisions(&mut self, id: BaronyId, decisions: &TurnDecisions) -> Result<()> {
        if let Some(units) = decisions.order {
            self.submit_order(id, units)?;
        }
        for plan in &decisions.attacks {
            self.submit_attack(id, plan.target, plan.knights, plan.footmen)?;
        }
        Ok(())
    }

    /// Most castles a barony could order alongside its pending order.
    #[must_use]
    pub fn max_castles_to_buy(&self, id: BaronyId) -> i32 {
        max_castles_to_buy(self.barony(id), self.order(id))
    }

    /// Most knights a barony could order alongside its pending order.
    #[must_use]
    pub fn max_knights_to_buy(&self, id: BaronyId) -> i32 {
        max_knights_to_buy(self.barony(id), self.order(id))
    }

    /// Most footmen a barony could order alongside its pending order.
    #[must_use]
    pub fn max_footmen_to_buy(&self, id: BaronyId) -> i32 {
        max_footmen_to_buy(self.barony(id), self.order(id))
    }

    /// Knights `origin` could send to `target`.
    ///
    /// Knights already committed against other targets this turn are not
    /// available; any already committed against `target` are, since a new
    /// attack replaces the old one.
    #[must_use]
    pub fn max_knights_to_send(&self, origin: BaronyId, target: BaronyId) -> i32 {
        let committed: i32 = self
            .committed_elsewhere(origin, target)
            .map(|attack| attack.knights)
            .sum();
        self.barony(origin).knights - committed
    }

    /// Footmen `origin` could send to `target`.
    #[must_use]
    pub fn max_footmen_to_send(&self, origin: BaronyId, target: BaronyId) -> i32 {
        let committed: i32 = self
            .committed_elsewhere(origin, target)
            .map(|attack| attack.footmen)
            .sum();
        self.barony(origin).footmen - committed
    }

    fn committed_elsewhere(
        &self,
        origin: BaronyId,
        target: BaronyId,
    ) -> impl Iterator<Item = &Attack> {
        self.attacks_from(origin)
            .filter(move |attack| attack.target != target)
    }

    /// Resolve one turn for every barony.
    ///
    /// Returns `None`, changing nothing, once the final turn has been played.
    pub fn process_turn(&mut self) -> Option<TurnOutcome> {
        if self.is_complete() {
            return None;
        }

        let turn = self.turn + 1;
        tracing::debug!(turn, "Resolving turn");

        // 1. Reports
        self.reports = std::array::from_fn(|_| None);

        // 2. Payment
        self.take_payments();

        // 3-4. Battles
        self.dispatch_forces();
        let battles = self.fight_battles();

        // 5. Delivery
        self.deliver_orders();

        // 6. Economy
        self.run_economy();

        // 7. Rankings
        calculate_rankings(&mut self.baronies);

        self.turn = turn;
        let complete = self.is_complete();
        tracing::info!(turn, battles, complete, "Turn resolved");

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            tracing::debug!(turn = self.turn, state_hash = hash, "Game state hash");
        }

        #[cfg(feature = "debug-validation")]
        for barony in &self.baronies {
            assert!(
                barony.is_within_limits(),
                "{} out of limits after turn {turn}: {barony:?}",
                barony.name
            );
        }

        Some(TurnOutcome {
            turn,
            battles,
            complete,
        })
    }

    fn report_mut(&mut self, id: BaronyId) -> &mut Report {
        self.reports[id.index()].get_or_insert_with(|| Report::new(id))
    }

    fn take_payments(&mut self) {
        for (barony, order) in self.baronies.iter_mut().zip(self.orders.iter_mut()) {
            if let Some(order) = order {
                take_payment(barony, order);
            }
        }
    }

    /// Send every attacking force out of its home garrison.
    fn dispatch_forces(&mut self) {
        for (barony, row) in self.baronies.iter_mut().zip(self.attacks.iter()) {
            for attack in row.iter().flatten() {
                barony.knights -= attack.knights;
                barony.footmen -= attack.footmen;
            }
        }
    }

    /// Resolve every battle from the post-dispatch state, then apply them.
    ///
    /// Returns the number of baronies that were attacked.
    fn fight_battles(&mut self) -> usize {
        let mut battles = 0;

        for target in BaronyId::all() {
            let inbound: Vec<Attack> = self
                .attacks
                .iter()
                .filter_map(|row| row[target.index()])
                .collect();
            let results = resolve_battle(target, self.barony(target), &inbound);
            if results.is_empty() {
                continue;
            }

            battles += 1;
            for result in results {
                self.report_mut(result.origin).attacks[target.index()] = Some(result);
                self.report_mut(target).defences[result.origin.index()] = Some(result);
            }
        }

        for origin in BaronyId::all() {
            for target in BaronyId::all() {
                let result = self.reports[origin.index()]
                    .as_ref()
                    .and_then(|report| report.attacks[target.index()]);
                if let Some(result) = result {
                    apply_battle(&mut self.baronies, &result);
                }
            }
        }

        self.attacks = [[None; BARONIES]; BARONIES];
        battles
    }

    fn deliver_orders(&mut self) {
        for id in BaronyId::all() {
            let Some(order) = self.orders[id.index()].take() else {
                continue;
            };
            match deliver(&mut self.baronies[id.index()], &order) {
                Delivery::Delivered(units) => self.report_mut(id).delivered = Some(units),
                Delivery::NotDelivered(units) => self.report_mut(id).not_delivered = Some(units),
            }
        }
    }

    fn run_economy(&mut self) {
        for id in BaronyId::all() {
            let outcome = resolve_economy(&mut self.baronies[id.index()]);
            let report = self.report_mut(id);
            report.migration = outcome.migration;
            report.tax = outcome.tax;
            report.attrition = outcome.attrition;
        }
    }

    /// Compute a hash of the game state for determinism checks.
    ///
    /// Covers the turn counter, every barony and any pending decisions.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.turn.hash(&mut hasher);
        self.baronies.hash(&mut hasher);
        self.orders.hash(&mut hasher);
        self.attacks.hash(&mut hasher);
        hasher.finish()
    }
}
