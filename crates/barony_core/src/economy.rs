//! Population, tax and upkeep.
//!
//! Runs once per barony per turn, whether or not the barony did anything.
//! People drift towards the land available to them, pay tax, and the
//! treasury then pays for castles, knights and footmen. When the treasury
//! cannot cover the upkeep, part of the military deserts.

use serde::{Deserialize, Serialize};

use crate::barony::Barony;
use crate::math::Fraction;
use crate::order::Units;
use crate::rules::{
    CASTLES_PER_TAX, CASTLES_TAX, FOOTMEN_PER_TAX, FOOTMEN_TAX, KNIGHTS_PER_TAX, KNIGHTS_TAX,
    MAX_GOLD, POPULATION_PER_GOLD,
};

/// What the economy phase did to one barony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyOutcome {
    /// Net change in population.
    pub migration: i32,
    /// Tax collected.
    pub tax: i32,
    /// Upkeep actually paid.
    pub expenses: i32,
    /// Units lost to desertion, if upkeep was unaffordable.
    pub attrition: Option<Units>,
}

/// Upkeep owed for a barony's castles, knights and footmen.
///
/// Each term is evaluated left to right in integer arithmetic, so footmen
/// cost one gold per whole five.
#[must_use]
pub fn calculate_expenses(barony: &Barony) -> i32 {
    barony.castles * CASTLES_TAX / CASTLES_PER_TAX
        + barony.knights * KNIGHTS_TAX / KNIGHTS_PER_TAX
        + barony.footmen * FOOTMEN_TAX / FOOTMEN_PER_TAX
}

/// Population change this turn: half the gap between land and people.
///
/// Rounds toward zero in both directions.
#[must_use]
pub const fn migration(barony: &Barony) -> i32 {
    (barony.land - barony.population) / 2
}

/// Fraction of the military that deserts when `gold` cannot pay `expenses`.
#[must_use]
pub fn desertion_fraction(gold: i32, expenses: i32) -> Fraction {
    Fraction::new(i64::from(gold), i64::from(expenses))
        .complement()
        .halved()
}

/// Run the economy for one barony.
///
/// Tax is assessed on the population before this turn's migration arrives.
pub fn resolve_economy(barony: &mut Barony) -> EconomyOutcome {
    let migration = migration(barony);
    let tax = barony.population / POPULATION_PER_GOLD;
    barony.population += migration;
    barony.gold += tax;

    let mut expenses = calculate_expenses(barony);
    let mut attrition = None;

    if expenses > barony.gold {
        let desertion = desertion_fraction(barony.gold, expenses);
        let lost = Units::new(
            desertion.of(barony.castles),
            desertion.of(barony.knights),
            desertion.of(barony.footmen),
        );
        // Survivors are truncated on their own, not derived from the losses.
        let remaining = desertion.complement();
        barony.castles = remaining.of(barony.castles);
        barony.knights = remaining.of(barony.knights);
        barony.footmen = remaining.of(barony.footmen);
        tracing::debug!(
            barony = %barony.name,
            owed = expenses,
            gold = barony.gold,
            desertion = %desertion,
            castles = lost.castles,
            knights = lost.knights,
            footmen = lost.footmen,
            "Upkeep unaffordable, forces deserted"
        );
        attrition = Some(lost);
        expenses = barony.gold;
    }

    barony.gold -= expenses;
    barony.gold = barony.gold.min(MAX_GOLD);

    EconomyOutcome {
        migration,
        tax,
        expenses,
        attrition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barony() -> Barony {
        Barony::new("Neville").unwrap()
    }

    #[test]
    fn test_expenses_truncate_footmen() {
        let mut b = barony();
        b.castles = 3;
        b.knights = 7;
        b.footmen = 14;
        // 3*10 + 7*1 + 14/5
        assert_eq!(calculate_expenses(&b), 30 + 7 + 2);
    }

    #[test]
    fn test_starting_expenses() {
        // 40 castles, 400 knights, 4000 footmen
        assert_eq!(calculate_expenses(&barony()), 400 + 400 + 800);
    }

    #[test]
    fn test_migration_rounds_toward_zero() {
        let mut b = barony();
        b.land = 4001;
        b.population = 4000;
        assert_eq!(migration(&b), 0);
        b.land = 3999;
        assert_eq!(migration(&b), 0);
        b.land = 3995;
        assert_eq!(migration(&b), -2);
        b.land = 4005;
        assert_eq!(migration(&b), 2);
    }

    #[test]
    fn test_fresh_barony_economy() {
        let mut b = barony();
        let outcome = resolve_economy(&mut b);

        assert_eq!(outcome.migration, 0);
        assert_eq!(outcome.tax, 4000);
        assert_eq!(outcome.expenses, 1600);
        assert_eq!(outcome.attrition, None);
        assert_eq!(b.population, 4000);
        assert_eq!(b.gold, 4000 + 4000 - 1600);
        assert_eq!((b.castles, b.knights, b.footmen), (40, 400, 4000));
    }

    #[test]
    fn test_tax_uses_population_before_migration() {
        let mut b = barony();
        b.land = 6000;
        b.population = 2000;
        b.gold = 0;
        b.castles = 0;
        b.knights = 0;
        b.footmen = 0;
        let outcome = resolve_economy(&mut b);

        assert_eq!(outcome.migration, 2000);
        assert_eq!(outcome.tax, 2000);
        assert_eq!(b.population, 4000);
        assert_eq!(b.gold, 2000);
    }

    #[test]
    fn test_desertion_when_upkeep_unaffordable() {
        // Expenses 500 (40 castles, 100 knights) against 100 gold after tax.
        let mut b = barony();
        b.land = 100;
        b.population = 100;
        b.gold = 0;
        b.castles = 40;
        b.knights = 100;
        b.footmen = 0;

        let outcome = resolve_economy(&mut b);

        assert_eq!(outcome.tax, 100);
        assert_eq!(outcome.expenses, 100);
        assert_eq!(outcome.attrition, Some(Units::new(16, 40, 0)));
        assert_eq!(b.castles, 24);
        assert_eq!(b.knights, 60);
        assert_eq!(b.gold, 0);
        assert!(b.is_within_limits());
    }

    #[test]
    fn test_desertion_fraction_value() {
        let fraction = desertion_fraction(100, 500);
        assert_eq!(fraction.to_string(), "0.4000");
        assert_eq!(fraction.of(1000), 400);
    }

    #[test]
    fn test_penniless_barony_loses_half() {
        let mut b = barony();
        b.land = 0;
        b.population = 0;
        b.gold = 0;
        b.castles = 10;
        b.knights = 0;
        b.footmen = 0;
        let outcome = resolve_economy(&mut b);

        assert_eq!(outcome.attrition, Some(Units::new(5, 0, 0)));
        assert_eq!(b.castles, 5);
        assert_eq!(b.gold, 0);
    }

    #[test]
    fn test_desertion_truncates_survivors() {
        let mut b = barony();
        b.land = 0;
        b.population = 0;
        b.gold = 0;
        b.castles = 5;
        b.knights = 3;
        b.footmen = 7;
        let outcome = resolve_economy(&mut b);

        // Half of 5, 3 and 7 deserts; the records and survivors both truncate.
        assert_eq!(outcome.attrition, Some(Units::new(2, 1, 3)));
        assert_eq!((b.castles, b.knights, b.footmen), (2, 1, 3));
        assert_eq!(b.gold, 0);
    }

    #[test]
    fn test_gold_clamped_to_ceiling() {
        let mut b = barony();
        b.gold = 31000;
        b.castles = 0;
        b.knights = 0;
        b.footmen = 0;
        resolve_economy(&mut b);
        assert_eq!(b.gold, MAX_GOLD);
    }
}
