//! Headless game runner.
//!
//! Plays a whole game without a terminal: every barony's decisions come
//! from its [`Controller`], turns are resolved one after another, and a
//! [`TurnSummary`] is produced after each.

use std::sync::Arc;

use barony_core::prelude::*;

use crate::config::RunConfig;
use crate::error::Result;
use crate::opponent::ComputerOpponent;
use crate::script::{Script, ScriptedPlayer};
use crate::summary::{GameSummary, TurnSummary};

/// Where one barony's decisions come from.
#[derive(Debug, Clone)]
pub enum Controller {
    /// A human, replaying a script in batch runs.
    Human(ScriptedPlayer),
    /// The seeded computer opponent.
    Computer(ComputerOpponent),
    /// A remote player. Remote decisions have no transport yet, so these
    /// baronies stand idle.
    Remote(Passive),
}

impl Controller {
    /// The kind of controller, as recorded on the barony.
    #[must_use]
    pub const fn kind(&self) -> ControllerKind {
        match self {
            Self::Human(_) => ControllerKind::Human,
            Self::Computer(_) => ControllerKind::Computer,
            Self::Remote(_) => ControllerKind::Remote,
        }
    }
}

impl DecisionSource for Controller {
    fn decide(&mut self, game: &Game, barony: BaronyId) -> TurnDecisions {
        match self {
            Self::Human(player) => player.decide(game, barony),
            Self::Computer(opponent) => opponent.decide(game, barony),
            Self::Remote(idle) => idle.decide(game, barony),
        }
    }
}

/// Runs one game to completion.
#[derive(Debug, Clone)]
pub struct GameRunner {
    seed: u64,
    game: Game,
    controllers: [Controller; BARONIES],
}

impl GameRunner {
    /// Set up a game from `config`, loading its script if it names one.
    pub fn new(config: &RunConfig) -> Result<Self> {
        let script = match &config.script {
            Some(path) => Script::load(path)?,
            None => Script::default(),
        };
        Ok(Self::with_script(config, script))
    }

    /// Set up a game from `config` with human baronies playing `script`.
    #[must_use]
    pub fn with_script(config: &RunConfig, script: Script) -> Self {
        let script = Arc::new(script);
        let kinds = config.controllers();
        let controllers: [Controller; BARONIES] = std::array::from_fn(|index| {
            let id = BaronyId::roster()[index];
            match kinds[index] {
                ControllerKind::Human => Controller::Human(ScriptedPlayer::new(Arc::clone(&script))),
                ControllerKind::Computer => Controller::Computer(ComputerOpponent::new(config.seed, id)),
                ControllerKind::Remote => Controller::Remote(Passive),
            }
        });

        let mut game = Game::new();
        for (id, controller) in BaronyId::all().zip(&controllers) {
            game.set_controller(id, controller.kind());
        }

        tracing::info!(
            seed = config.seed,
            humans = config.humans.len(),
            remotes = config.remotes.len(),
            scripted_turns = script.turns.len(),
            "Game set up"
        );

        Self {
            seed: config.seed,
            game,
            controllers,
        }
    }

    /// The game being played.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Gather every barony's decisions and resolve one turn.
    ///
    /// Returns `None` once the game is over.
    pub fn play_turn(&mut self) -> Result<Option<TurnSummary>> {
        if self.game.is_complete() {
            return Ok(None);
        }

        for (id, controller) in BaronyId::all().zip(self.controllers.iter_mut()) {
            let decisions = controller.decide(&self.game, id);
            self.game.apply_decisions(id, &decisions)?;
        }

        Ok(self
            .game
            .process_turn()
            .map(|outcome| TurnSummary::capture(&self.game, &outcome)))
    }

    /// Play every remaining turn, handing each summary to `on_turn`.
    pub fn run_with(&mut self, mut on_turn: impl FnMut(&TurnSummary)) -> Result<GameSummary> {
        let mut turns = Vec::new();
        while let Some(summary) = self.play_turn()? {
            on_turn(&summary);
            turns.push(summary);
        }

        let final_standings: Vec<String> = self
            .game
            .standings()
            .iter()
            .map(|barony| barony.name.clone())
            .collect();
        let summary = GameSummary {
            seed: self.seed,
            turns,
            final_standings,
            final_state_hash: self.game.state_hash(),
        };

        tracing::info!(
            seed = self.seed,
            winner = summary.winner().unwrap_or(""),
            final_state_hash = summary.final_state_hash,
            "Game complete"
        );

        Ok(summary)
    }

    /// Play every remaining turn.
    pub fn run(&mut self) -> Result<GameSummary> {
        self.run_with(|_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunnerError;
    use barony_test_utils::fixtures::{assert_ranks_consistent, assert_within_limits, barony};

    fn config(seed: u64) -> RunConfig {
        RunConfig {
            seed,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_full_game_plays_every_turn() {
        let mut runner = GameRunner::with_script(&config(7), Script::default());
        let summary = runner.run().unwrap();

        assert_eq!(summary.turns.len(), TURNS as usize);
        assert!(summary.turns.last().unwrap().complete);
        assert_eq!(summary.final_standings.len(), BARONIES);
        assert_eq!(
            summary.winner(),
            Some(runner.game().standings()[0].name.as_str())
        );
        assert!(runner.game().is_complete());
        assert!(runner.play_turn().unwrap().is_none());
        assert_within_limits(runner.game());
        assert_ranks_consistent(runner.game());
    }

    #[test]
    fn test_same_seed_same_game() {
        let first = GameRunner::with_script(&config(2024), Script::default())
            .run()
            .unwrap();
        let second = GameRunner::with_script(&config(2024), Script::default())
            .run()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_runs_agree() {
        let hashes: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        GameRunner::with_script(&config(99), Script::default())
                            .run()
                            .map(|summary| summary.final_state_hash)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });
        assert!(hashes.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_controllers_follow_config() {
        let config = RunConfig {
            humans: vec![barony(0)],
            remotes: vec![barony(7)],
            ..RunConfig::default()
        };
        let runner = GameRunner::with_script(&config, Script::default());
        let game = runner.game();
        assert_eq!(game.barony(barony(0)).controller, ControllerKind::Human);
        assert_eq!(game.barony(barony(1)).controller, ControllerKind::Computer);
        assert_eq!(game.barony(barony(7)).controller, ControllerKind::Remote);
    }

    #[test]
    fn test_scripted_human_builds_castles() {
        let config = RunConfig {
            humans: vec![barony(0)],
            ..RunConfig::default()
        };
        let script = Script::from_ron_str(
            "Script(turns: [{ 0: (order: Some((castles: 10, knights: 0, footmen: 0))) }])",
        )
        .unwrap();
        let mut runner = GameRunner::with_script(&config, script);

        let summary = runner.play_turn().unwrap().unwrap();
        assert_eq!(summary.baronies[0].delivered, Some(Units::new(10, 0, 0)));
    }

    #[test]
    fn test_invalid_script_decision_is_an_error() {
        let config = RunConfig {
            humans: vec![barony(0)],
            ..RunConfig::default()
        };
        let script = Script::from_ron_str(
            "Script(turns: [{ 0: (attacks: [(target: 0, knights: 1, footmen: 0)]) }])",
        )
        .unwrap();
        let mut runner = GameRunner::with_script(&config, script);

        assert!(matches!(
            runner.play_turn(),
            Err(RunnerError::Game(GameError::SelfAttack(_)))
        ));
    }

    #[test]
    fn test_missing_script_file() {
        let config = RunConfig {
            script: Some("/nonexistent/script.ron".into()),
            ..RunConfig::default()
        };
        assert!(matches!(
            GameRunner::new(&config),
            Err(RunnerError::FileNotFound(_))
        ));
    }
}
