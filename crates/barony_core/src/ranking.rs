//! Standings by land held.

use crate::barony::{Barony, BaronyId};
use crate::rules::BARONIES;

/// Baronies ordered from largest to smallest landholder.
///
/// The sort is stable, so baronies with equal land keep roster order.
#[must_use]
pub fn standings_order(baronies: &[Barony; BARONIES]) -> [BaronyId; BARONIES] {
    let mut order = BaronyId::roster();
    order.sort_by(|a, b| baronies[b.index()].land.cmp(&baronies[a.index()].land));
    order
}

/// Assign every barony its rank by land.
///
/// The largest landholder ranks 1. Ties share a rank and the next distinct
/// holding takes its position in the order, so two baronies tied first are
/// followed by a third, not a second.
pub fn calculate_rankings(baronies: &mut [Barony; BARONIES]) {
    let order = standings_order(baronies);

    let mut rank = 1;
    let mut previous_land = baronies[order[0].index()].land;
    for (position, id) in order.iter().enumerate() {
        let land = baronies[id.index()].land;
        if land < previous_land {
            rank = position as u32 + 1;
        }
        previous_land = land;
        baronies[id.index()].rank = rank;
    }
}
