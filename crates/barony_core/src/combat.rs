//! Battle resolution.
//!
//! All attacks on one barony in a turn are fought as a single battle. The
//! attackers' combined strength is set against the defender's castles and
//! footmen, and each side loses in proportion to the other side's share of
//! the total:
//!
//! ```text
//! attack  = knights × 10 + footmen
//! defence = castles × 100 + footmen at home
//! attacker loss = defence / (attack + defence)
//! defender loss = attack  / (attack + defence)
//! ```
//!
//! The defender loses that fraction of its land, gold, castles and footmen.
//! Knight-heavy attacks capture the castles they beat; footmen-heavy attacks
//! raze them. Spoils and losses are then split between the attackers by
//! what each contributed.
//!
//! Outcomes for every target are computed from the same pre-battle
//! snapshot and only then applied, so the order in which targets are
//! assessed cannot change any result.

use serde::{Deserialize, Serialize};

use crate::attack::Attack;
use crate::barony::{Barony, BaronyId};
use crate::math::Fraction;
use crate::report::BattleReport;
use crate::rules::{
    BARONIES, CASTLE_DEFENCE, FOOTMEN_PER_KNIGHT, KNIGHT_STRENGTH, MAX_CASTLES, MAX_GOLD,
};

/// Combined outcome of every attack on one barony, before it is shared out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// The barony under attack.
    pub target: BaronyId,
    /// Knights sent by all attackers.
    pub knights: i32,
    /// Footmen sent by all attackers.
    pub footmen: i32,
    /// Raw strength of all attackers.
    pub attack: i64,
    /// Strength of the defender.
    pub defence: i64,
    /// Land lost by the defender.
    pub land_taken: i32,
    /// Gold lost by the defender.
    pub gold_looted: i32,
    /// Castles captured from the defender.
    pub castles_taken: i32,
    /// Castles destroyed at the defender.
    pub castles_razed: i32,
    /// Defending footmen killed.
    pub footmen_slain: i32,
    /// Attacking knights killed.
    pub knights_lost: i32,
    /// Attacking footmen killed.
    pub footmen_lost: i32,
}

impl Engagement {
    /// Assess the battle fought at `defender` by `attacks`.
    ///
    /// Returns `None` when nobody was sent, in which case no battle is
    /// fought and the defender is untouched.
    #[must_use]
    pub fn assess(target: BaronyId, defender: &Barony, attacks: &[Attack]) -> Option<Self> {
        let knights: i32 = attacks.iter().map(|a| a.knights).sum();
        let footmen: i32 = attacks.iter().map(|a| a.footmen).sum();
        let attack = knights as i64 * KNIGHT_STRENGTH + footmen as i64;
        if attack == 0 {
            return None;
        }

        let defence = defender.castles as i64 * CASTLE_DEFENCE + defender.footmen as i64;
        let attacker_loss = Fraction::new(defence, attack + defence);
        let defender_loss = Fraction::new(attack, attack + defence);

        let castles_beaten = defender_loss.of(defender.castles);
        let captured =
            Fraction::new(knights as i64, knights as i64 + footmen as i64 / FOOTMEN_PER_KNIGHT);
        let castles_taken = captured.of(castles_beaten);

        let engagement = Self {
            target,
            knights,
            footmen,
            attack,
            defence,
            land_taken: defender_loss.of(defender.land),
            gold_looted: defender_loss.of(defender.gold),
            castles_taken,
            castles_razed: castles_beaten - castles_taken,
            footmen_slain: defender_loss.of(defender.footmen),
            knights_lost: attacker_loss.of(knights),
            footmen_lost: attacker_loss.of(footmen),
        };

        tracing::debug!(
            target = %target,
            attack,
            defence,
            attacker_loss = %attacker_loss,
            defender_loss = %defender_loss,
            land_taken = engagement.land_taken,
            gold_looted = engagement.gold_looted,
            castles_taken = engagement.castles_taken,
            castles_razed = engagement.castles_razed,
            "Battle assessed"
        );

        Some(engagement)
    }

    /// One attacker's share of the battle.
    ///
    /// Knight losses are shared by knights sent, footmen losses and loot by
    /// footmen sent, and land, castles and slain defenders by raw strength.
    /// When no attacker sent footmen the loot is shared by strength instead,
    /// so a knights-only raid still carries off gold.
    #[must_use]
    pub fn share(&self, attack: &Attack) -> BattleReport {
        let knights_part = Fraction::new(attack.knights as i64, self.knights as i64);
        let footmen_part = Fraction::new(attack.footmen as i64, self.footmen as i64);
        let attack_part = Fraction::new(attack.strength(), self.attack);
        let loot_part = if self.footmen == 0 {
            attack_part
        } else {
            footmen_part
        };

        let report = BattleReport {
            origin: attack.origin,
            target: attack.target,
            knights_sent: attack.knights,
            footmen_sent: attack.footmen,
            land_taken: attack_part.of(self.land_taken),
            gold_looted: loot_part.of(self.gold_looted),
            castles_taken: attack_part.of(self.castles_taken),
            castles_razed: attack_part.of(self.castles_razed),
            knights_lost: knights_part.of(self.knights_lost),
            footmen_lost: footmen_part.of(self.footmen_lost),
            footmen_slain: attack_part.of(self.footmen_slain),
        };

        tracing::trace!(
            origin = %attack.origin,
            target = %attack.target,
            knights_part = %knights_part,
            footmen_part = %footmen_part,
            attack_part = %attack_part,
            "Battle share"
        );

        report
    }
}

/// Fight the battle at one barony and share out the result.
///
/// Returns one report per attack, in the order given. Empty when nobody was
/// sent.
#[must_use]
pub fn resolve_battle(target: BaronyId, defender: &Barony, attacks: &[Attack]) -> Vec<BattleReport> {
    Engagement::assess(target, defender, attacks)
        .map(|engagement| attacks.iter().map(|a| engagement.share(a)).collect())
        .unwrap_or_default()
}

/// Borrow two distinct baronies mutably.
fn pair_mut(
    baronies: &mut [Barony; BARONIES],
    first: BaronyId,
    second: BaronyId,
) -> (&mut Barony, &mut Barony) {
    let (a, b) = (first.index(), second.index());
    debug_assert_ne!(a, b, "a barony cannot fight itself");
    if a < b {
        let (left, right) = baronies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = baronies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Apply one attacker's battle outcome to both baronies.
///
/// Land, gold and captured castles move from target to origin, razed
/// castles and slain footmen are removed from the target, and the surviving
/// attackers return home. Target quantities are then floored at zero and the
/// origin's gold and castles capped.
pub fn apply_battle(baronies: &mut [Barony; BARONIES], report: &BattleReport) {
    let (origin, target) = pair_mut(baronies, report.origin, report.target);

    origin.land += report.land_taken;
    target.land -= report.land_taken;
    origin.gold += report.gold_looted;
    target.gold -= report.gold_looted;
    origin.castles += report.castles_taken;
    target.castles -= report.castles_taken;

    target.castles -= report.castles_razed;
    target.footmen -= report.footmen_slain;
    origin.knights += report.knights_sent - report.knights_lost;
    origin.footmen += report.footmen_sent - report.footmen_lost;

    target.land = target.land.max(0);
    target.gold = target.gold.max(0);
    target.castles = target.castles.max(0);
    target.footmen = target.footmen.max(0);

    origin.gold = origin.gold.min(MAX_GOLD);
    origin.castles = origin.castles.min(MAX_CASTLES);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> BaronyId {
        BaronyId::new(index).unwrap()
    }

    fn defender(castles: i32, footmen: i32) -> Barony {
        let mut b = Barony::new("Howard").unwrap();
        b.castles = castles;
        b.footmen = footmen;
        b
    }

    #[test]
    fn test_no_forces_no_battle() {
        let d = defender(40, 4000);
        assert!(Engagement::assess(id(1), &d, &[]).is_none());
        assert!(Engagement::assess(id(1), &d, &[Attack::new(id(0), id(1), 0, 0)]).is_none());
        assert!(resolve_battle(id(1), &d, &[]).is_empty());
    }

    #[test]
    fn test_knights_raid_on_undefended_barony() {
        let d = defender(0, 40);
        let attacks = [Attack::new(id(0), id(1), 200, 0)];
        let engagement = Engagement::assess(id(1), &d, &attacks).unwrap();

        assert_eq!(engagement.attack, 2000);
        assert_eq!(engagement.defence, 40);
        // defender loss 2000/2040
        assert_eq!(engagement.land_taken, 3921);
        assert_eq!(engagement.gold_looted, 3921);
        assert_eq!(engagement.footmen_slain, 39);
        assert_eq!(engagement.castles_taken, 0);
        assert_eq!(engagement.castles_razed, 0);
        // attacker loss 40/2040 of 200 knights
        assert_eq!(engagement.knights_lost, 3);
        assert_eq!(engagement.footmen_lost, 0);

        let report = engagement.share(&attacks[0]);
        assert_eq!(report.land_taken, 3921);
        assert_eq!(report.gold_looted, 3921);
        assert_eq!(report.knights_lost, 3);
        assert_eq!(report.knights_sent, 200);
    }

    #[test]
    fn test_knights_capture_footmen_raze() {
        // Equal strengths: 1000 attack against 1000 defence, half lost each.
        let d = defender(10, 0);

        let knights = [Attack::new(id(0), id(1), 100, 0)];
        let e = Engagement::assess(id(1), &d, &knights).unwrap();
        assert_eq!((e.castles_taken, e.castles_razed), (5, 0));

        let footmen = [Attack::new(id(0), id(1), 0, 1000)];
        let e = Engagement::assess(id(1), &d, &footmen).unwrap();
        assert_eq!((e.castles_taken, e.castles_razed), (0, 5));
        assert_eq!(e.footmen_lost, 500);
    }

    #[test]
    fn test_mixed_attack_splits_castles() {
        // 50 knights and 500 footmen: capture fraction 50 / (50 + 50) = 1/2.
        let d = defender(10, 0);
        let attacks = [Attack::new(id(0), id(1), 50, 500)];
        let e = Engagement::assess(id(1), &d, &attacks).unwrap();
        assert_eq!(e.attack, 1000);
        assert_eq!(e.castles_taken + e.castles_razed, 5);
        assert_eq!(e.castles_taken, 2);
        assert_eq!(e.castles_razed, 3);
    }

    #[test]
    fn test_few_footmen_alone_raze_without_fault() {
        // 5 footmen: knights + footmen / 10 is zero, nothing is captured.
        let d = defender(0, 0);
        let attacks = [Attack::new(id(0), id(1), 0, 5)];
        let e = Engagement::assess(id(1), &d, &attacks).unwrap();
        assert_eq!(e.castles_taken, 0);
        assert_eq!(e.defence, 0);
        assert_eq!(e.land_taken, 4000);
    }

    #[test]
    fn test_two_attackers_share_by_contribution() {
        let d = defender(0, 1000);
        let attacks = [
            Attack::new(id(0), id(2), 300, 1000),
            Attack::new(id(1), id(2), 100, 0),
        ];
        let e = Engagement::assess(id(2), &d, &attacks).unwrap();
        // attack 5000, defence 1000
        assert_eq!(e.attack, 5000);
        assert_eq!(e.land_taken, 3333);
        assert_eq!(e.gold_looted, 3333);
        assert_eq!(e.knights_lost, 66);
        assert_eq!(e.footmen_lost, 166);

        let big = e.share(&attacks[0]);
        let small = e.share(&attacks[1]);

        // strength 4000/5000 and 1000/5000
        assert_eq!(big.land_taken, 2666);
        assert_eq!(small.land_taken, 666);
        // knights 300/400 and 100/400
        assert_eq!(big.knights_lost, 49);
        assert_eq!(small.knights_lost, 16);
        // only the first sent footmen, so it takes all the loot
        assert_eq!(big.gold_looted, 3333);
        assert_eq!(small.gold_looted, 0);
        assert_eq!(big.footmen_lost, 166);
        assert_eq!(small.footmen_lost, 0);
    }

    #[test]
    fn test_apply_battle_transfers_and_returns_survivors() {
        let mut baronies: [Barony; BARONIES] =
            std::array::from_fn(|_| Barony::new("Percy").unwrap());
        // Forces have already left home.
        baronies[0].knights -= 200;

        let report = BattleReport {
            origin: id(0),
            target: id(1),
            knights_sent: 200,
            footmen_sent: 0,
            land_taken: 100,
            gold_looted: 50,
            castles_taken: 3,
            castles_razed: 2,
            knights_lost: 20,
            footmen_lost: 0,
            footmen_slain: 30,
        };
        apply_battle(&mut baronies, &report);

        assert_eq!(baronies[0].land, 4100);
        assert_eq!(baronies[1].land, 3900);
        assert_eq!(baronies[0].gold, 4050);
        assert_eq!(baronies[1].gold, 3950);
        assert_eq!(baronies[0].castles, 43);
        assert_eq!(baronies[1].castles, 35);
        assert_eq!(baronies[0].knights, 380);
        assert_eq!(baronies[1].footmen, 3970);
    }

    #[test]
    fn test_apply_battle_clamps() {
        let mut baronies: [Barony; BARONIES] =
            std::array::from_fn(|_| Barony::new("Percy").unwrap());
        baronies[3].gold = 31990;
        baronies[3].castles = 318;
        baronies[2].footmen = 5;

        let report = BattleReport {
            origin: id(3),
            target: id(2),
            knights_sent: 0,
            footmen_sent: 0,
            land_taken: 0,
            gold_looted: 100,
            castles_taken: 5,
            castles_razed: 0,
            knights_lost: 0,
            footmen_lost: 0,
            footmen_slain: 10,
        };
        apply_battle(&mut baronies, &report);

        assert_eq!(baronies[3].gold, MAX_GOLD);
        assert_eq!(baronies[3].castles, MAX_CASTLES);
        assert_eq!(baronies[2].footmen, 0);
        assert_eq!(baronies[2].gold, 3900);
    }
}
