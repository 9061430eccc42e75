//! Turn and game summaries.
//!
//! Summaries are plain serializable snapshots taken after each turn, written
//! as JSON lines for machines or rendered as text for people.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use barony_core::prelude::*;

/// One barony's state after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaronySummary {
    /// Roster position.
    pub barony: BaronyId,
    /// Name of the barony.
    pub name: String,
    /// Who played it.
    pub controller: ControllerKind,
    /// Standing by land.
    pub rank: u32,
    /// Land owned.
    pub land: i32,
    /// People living there.
    pub population: i32,
    /// Gold in the treasury.
    pub gold: i32,
    /// Castles standing.
    pub castles: i32,
    /// Knights at home.
    pub knights: i32,
    /// Footmen at home.
    pub footmen: i32,
    /// Units that arrived this turn.
    pub delivered: Option<Units>,
    /// Units ordered but not affordable.
    pub not_delivered: Option<Units>,
    /// Units lost to unpaid upkeep.
    pub attrition: Option<Units>,
}

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// Turn just resolved, starting at 1.
    pub turn: u32,
    /// Whether the game is now over.
    pub complete: bool,
    /// Every attacker's share of every battle, in origin order.
    pub battles: Vec<BattleReport>,
    /// Baronies in roster order.
    pub baronies: Vec<BaronySummary>,
    /// Game state hash after the turn (for determinism validation).
    pub state_hash: u64,
}

impl TurnSummary {
    /// Snapshot `game` just after `outcome` was resolved.
    #[must_use]
    pub fn capture(game: &Game, outcome: &TurnOutcome) -> Self {
        let baronies = BaronyId::all()
            .map(|id| {
                let barony = game.barony(id);
                let report = game.report(id);
                BaronySummary {
                    barony: id,
                    name: barony.name.clone(),
                    controller: barony.controller,
                    rank: barony.rank,
                    land: barony.land,
                    population: barony.population,
                    gold: barony.gold,
                    castles: barony.castles,
                    knights: barony.knights,
                    footmen: barony.footmen,
                    delivered: report.and_then(|r| r.delivered),
                    not_delivered: report.and_then(|r| r.not_delivered),
                    attrition: report.and_then(|r| r.attrition),
                }
            })
            .collect();

        Self {
            turn: outcome.turn,
            complete: outcome.complete,
            battles: game.reports().flat_map(Report::outbound).copied().collect(),
            baronies,
            state_hash: game.state_hash(),
        }
    }

    /// Render as a human-readable block of text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Turn {} ===", self.turn);

        for battle in &self.battles {
            let _ = writeln!(
                out,
                "{} attacked {} with {} knights and {} footmen: took {} land and {} gold, \
                 captured {} castles, razed {}, slew {} footmen; lost {} knights and {} footmen",
                self.name(battle.origin),
                self.name(battle.target),
                battle.knights_sent,
                battle.footmen_sent,
                battle.land_taken,
                battle.gold_looted,
                battle.castles_taken,
                battle.castles_razed,
                battle.footmen_slain,
                battle.knights_lost,
                battle.footmen_lost,
            );
        }

        for barony in &self.baronies {
            if let Some(units) = barony.attrition {
                let _ = writeln!(
                    out,
                    "{} could not pay upkeep: {} castles, {} knights and {} footmen deserted",
                    barony.name, units.castles, units.knights, units.footmen
                );
            }
            if let Some(units) = barony.not_delivered {
                let _ = writeln!(
                    out,
                    "{} could not afford {} castles, {} knights and {} footmen",
                    barony.name, units.castles, units.knights, units.footmen
                );
            }
        }

        let _ = writeln!(
            out,
            "{:>4}  {:<10}  {:>6}  {:>6}  {:>6}  {:>7}  {:>7}  {:>7}  {}",
            "Rank", "Barony", "Land", "People", "Gold", "Castles", "Knights", "Footmen", "Player"
        );
        let mut standings: Vec<&BaronySummary> = self.baronies.iter().collect();
        standings.sort_by_key(|b| b.rank);
        for b in standings {
            let _ = writeln!(
                out,
                "{:>4}  {:<10}  {:>6}  {:>6}  {:>6}  {:>7}  {:>7}  {:>7}  {}",
                b.rank,
                b.name,
                b.land,
                b.population,
                b.gold,
                b.castles,
                b.knights,
                b.footmen,
                b.controller.display_name()
            );
        }
        out
    }

    fn name(&self, id: BaronyId) -> &str {
        self.baronies
            .get(id.index())
            .map_or("?", |b| b.name.as_str())
    }
}

/// A whole game, for the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Seed the computer opponents played with.
    pub seed: u64,
    /// Every turn in order.
    pub turns: Vec<TurnSummary>,
    /// Names from first to last by land.
    pub final_standings: Vec<String>,
    /// Final game state hash (for determinism validation).
    pub final_state_hash: u64,
}

impl GameSummary {
    /// Save as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load from a JSON file.
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }

    /// The winner, if the game was played.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.final_standings.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> BaronyId {
        BaronyId::new(index).unwrap()
    }

    #[test]
    fn test_capture_records_battles_and_reports() {
        let mut game = Game::new();
        game.submit_order(id(2), Units::new(50, 0, 0)).unwrap();
        game.submit_attack(id(0), id(1), 200, 0).unwrap();
        let outcome = game.process_turn().unwrap();

        let summary = TurnSummary::capture(&game, &outcome);
        assert_eq!(summary.turn, 1);
        assert_eq!(summary.battles.len(), 1);
        assert_eq!(summary.battles[0].origin, id(0));
        assert_eq!(summary.baronies.len(), BARONIES);
        assert_eq!(summary.baronies[2].not_delivered, Some(Units::new(50, 0, 0)));
        assert_eq!(summary.state_hash, game.state_hash());
    }

    #[test]
    fn test_render_mentions_battles_and_standings() {
        let mut game = Game::new();
        game.submit_attack(id(0), id(1), 200, 0).unwrap();
        let outcome = game.process_turn().unwrap();

        let text = TurnSummary::capture(&game, &outcome).render();
        assert!(text.starts_with("=== Turn 1 ==="));
        assert!(text.contains("Beaumont attacked Cavendish with 200 knights"));
        assert!(text.contains("Villiers"));
    }

    #[test]
    fn test_summary_json_round_trip() {
        let mut game = Game::new();
        let outcome = game.process_turn().unwrap();
        let summary = GameSummary {
            seed: 1,
            turns: vec![TurnSummary::capture(&game, &outcome)],
            final_standings: vec!["Beaumont".to_string()],
            final_state_hash: game.state_hash(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        summary.save(&path).unwrap();
        assert_eq!(GameSummary::load(&path).unwrap(), summary);
        assert_eq!(summary.winner(), Some("Beaumont"));
    }
}
