//! Per-barony reports explaining everything that changed in a turn.
//!
//! Reports are rebuilt from scratch each turn. A battle produces two
//! [`BattleReport`] values with identical numbers: one in the attacker's
//! outbound list and one in the defender's inbound list. Each report owns
//! its copy.

use serde::{Deserialize, Serialize};

use crate::barony::BaronyId;
use crate::order::Units;
use crate::rules::BARONIES;

/// Outcome of one barony's attack on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleReport {
    /// Barony whence the attack came.
    pub origin: BaronyId,
    /// Barony that was attacked.
    pub target: BaronyId,
    /// Knights sent by the origin.
    pub knights_sent: i32,
    /// Footmen sent by the origin.
    pub footmen_sent: i32,
    /// Land taken from the target.
    pub land_taken: i32,
    /// Gold looted from the target.
    pub gold_looted: i32,
    /// Castles captured from the target.
    pub castles_taken: i32,
    /// Castles destroyed at the target.
    pub castles_razed: i32,
    /// Attacking knights killed.
    pub knights_lost: i32,
    /// Attacking footmen killed.
    pub footmen_lost: i32,
    /// Defending footmen killed.
    pub footmen_slain: i32,
}

/// Everything that happened to a barony in the turn just resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Report {
    /// The barony this report is addressed to.
    pub barony: BaronyId,
    /// Attacks this barony made, indexed by target.
    pub attacks: [Option<BattleReport>; BARONIES],
    /// Attacks this barony suffered, indexed by attacker.
    pub defences: [Option<BattleReport>; BARONIES],
    /// Net change in population; negative when people fled.
    pub migration: i32,
    /// Tax collected.
    pub tax: i32,
    /// Units ordered and delivered.
    pub delivered: Option<Units>,
    /// Units ordered but not affordable.
    pub not_delivered: Option<Units>,
    /// Units lost because upkeep could not be paid.
    pub attrition: Option<Units>,
}

impl Report {
    /// Create an empty report for a barony.
    #[must_use]
    pub fn new(barony: BaronyId) -> Self {
        Self {
            barony,
            attacks: [None; BARONIES],
            defences: [None; BARONIES],
            migration: 0,
            tax: 0,
            delivered: None,
            not_delivered: None,
            attrition: None,
        }
    }

    /// Attacks made by this barony, in target order.
    pub fn outbound(&self) -> impl Iterator<Item = &BattleReport> {
        self.attacks.iter().flatten()
    }

    /// Attacks suffered by this barony, in attacker order.
    pub fn inbound(&self) -> impl Iterator<Item = &BattleReport> {
        self.defences.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> BaronyId {
        BaronyId::new(index).unwrap()
    }

    fn battle(origin: usize, target: usize) -> BattleReport {
        BattleReport {
            origin: id(origin),
            target: id(target),
            knights_sent: 10,
            footmen_sent: 0,
            land_taken: 5,
            gold_looted: 0,
            castles_taken: 0,
            castles_razed: 0,
            knights_lost: 1,
            footmen_lost: 0,
            footmen_slain: 0,
        }
    }

    #[test]
    fn test_new_report_is_empty() {
        let report = Report::new(id(4));
        assert_eq!(report.outbound().count(), 0);
        assert_eq!(report.inbound().count(), 0);
        assert!(report.delivered.is_none());
        assert!(report.not_delivered.is_none());
        assert!(report.attrition.is_none());
    }

    #[test]
    fn test_battle_copies_are_independent() {
        let mut attacker = Report::new(id(0));
        let mut defender = Report::new(id(1));
        let outcome = battle(0, 1);
        attacker.attacks[1] = Some(outcome);
        defender.defences[0] = Some(outcome);

        if let Some(record) = attacker.attacks[1].as_mut() {
            record.land_taken = 99;
        }
        assert_eq!(defender.inbound().next().map(|b| b.land_taken), Some(5));
        assert_eq!(attacker.outbound().next().map(|b| b.land_taken), Some(99));
    }
}
