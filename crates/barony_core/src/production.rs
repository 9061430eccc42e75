//! Building castles, training knights and drafting footmen.
//!
//! An order is paid for at the start of the turn, before battles, and its
//! units arrive after battles. Orders are all-or-nothing: if either the
//! population or the gold cost cannot be met, nothing is built and the
//! barony is told what it could not afford.

use serde::{Deserialize, Serialize};

use crate::barony::Barony;
use crate::order::{Order, Units};
use crate::rules::{CASTLE_COST, FOOTMAN_COST, KNIGHT_COST, MAX_CASTLES, MAX_FOOTMEN, MAX_KNIGHTS};

/// What became of an order at the end of the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// The order was paid for and these units arrived.
    Delivered(Units),
    /// The order could not be afforded; these units were not built.
    NotDelivered(Units),
}

/// Take population and gold for an order if the barony can afford both.
///
/// Returns `true` and marks the order paid on success. An unaffordable
/// order leaves the barony untouched.
pub fn take_payment(barony: &mut Barony, order: &mut Order) -> bool {
    let population_cost = order.population_cost();
    let gold_cost = order.gold_cost();

    // A cost outside the i32 range can never be met.
    let costs = i32::try_from(population_cost)
        .ok()
        .zip(i32::try_from(gold_cost).ok())
        .filter(|&(population, gold)| population <= barony.population && gold <= barony.gold);

    if let Some((population, gold)) = costs {
        barony.population -= population;
        barony.gold -= gold;
        order.paid = true;
        tracing::debug!(
            barony = %barony.name,
            population_cost,
            gold_cost,
            "Order paid"
        );
    } else {
        tracing::debug!(
            barony = %barony.name,
            population_cost,
            gold_cost,
            population = barony.population,
            gold = barony.gold,
            "Order unaffordable"
        );
    }
    order.paid
}

/// Deliver a paid order's units, or report an unpaid one as undelivered.
///
/// Deliveries beyond the unit ceilings are discarded; the returned record
/// still lists the units requested.
pub fn deliver(barony: &mut Barony, order: &Order) -> Delivery {
    if !order.paid {
        return Delivery::NotDelivered(order.units);
    }

    barony.castles = (barony.castles + order.units.castles).min(MAX_CASTLES);
    barony.knights = (barony.knights + order.units.knights).min(MAX_KNIGHTS);
    barony.footmen = (barony.footmen + order.units.footmen).min(MAX_FOOTMEN);
    Delivery::Delivered(order.units)
}

/// Population and gold left once the given other units are paid for.
fn budget_after(barony: &Barony, committed: i64) -> i64 {
    let population = i64::from(barony.population) - committed;
    let gold = i64::from(barony.gold) - committed;
    gold.min(population)
}

/// Narrow a unit count back to `i32`, saturating at either end.
fn saturate(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(if count < 0 { i32::MIN } else { i32::MAX })
}

fn units_cost(castles: i32, knights: i32, footmen: i32) -> i64 {
    i64::from(castles) * i64::from(CASTLE_COST)
        + i64::from(knights) * i64::from(KNIGHT_COST)
        + i64::from(footmen) * i64::from(FOOTMAN_COST)
}

/// Most castles the barony could add to its pending order.
///
/// Only the knights and footmen already ordered are deducted; the castles
/// already ordered are what this figure replaces.
#[must_use]
pub fn max_castles_to_buy(barony: &Barony, pending: Option<&Order>) -> i32 {
    let committed =
        pending.map_or(0, |order| units_cost(0, order.units.knights, order.units.footmen));
    saturate(budget_after(barony, committed) / i64::from(CASTLE_COST))
}

/// Most knights the barony could add to its pending order.
#[must_use]
pub fn max_knights_to_buy(barony: &Barony, pending: Option<&Order>) -> i32 {
    let committed =
        pending.map_or(0, |order| units_cost(order.units.castles, 0, order.units.footmen));
    saturate(budget_after(barony, committed) / i64::from(KNIGHT_COST))
}

/// Most footmen the barony could add to its pending order.
#[must_use]
pub fn max_footmen_to_buy(barony: &Barony, pending: Option<&Order>) -> i32 {
    let committed =
        pending.map_or(0, |order| units_cost(order.units.castles, order.units.knights, 0));
    saturate(budget_after(barony, committed) / i64::from(FOOTMAN_COST))
}
