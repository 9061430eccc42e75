//! Scripted decisions for human baronies.
//!
//! Batch runs have nobody at the keyboard, so human baronies replay their
//! decisions from a RON script instead. The script lists, turn by turn,
//! what each scripted barony does; a barony or turn the script does not
//! mention does nothing.
//!
//! ```ron
//! Script(
//!     turns: [
//!         {
//!             0: (order: Some((castles: 10, knights: 0, footmen: 0))),
//!             3: (attacks: [(target: 1, knights: 200, footmen: 0)]),
//!         },
//!         {},
//!         { 0: (order: Some((castles: 0, knights: 50, footmen: 500))) },
//!     ],
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use barony_core::prelude::*;

use crate::error::{Result, RunnerError};

/// Decisions for scripted baronies, turn by turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// `turns[n]` holds the decisions made before turn `n + 1` is resolved.
    pub turns: Vec<BTreeMap<BaronyId, TurnDecisions>>,
}

impl Script {
    /// Load a script from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RunnerError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Ok(ron::from_str(ron)?)
    }

    /// What `barony` does before the turn after `turns_played`.
    #[must_use]
    pub fn decisions(&self, turns_played: u32, barony: BaronyId) -> Option<&TurnDecisions> {
        self.turns
            .get(turns_played as usize)
            .and_then(|turn| turn.get(&barony))
    }
}

/// A human barony playing from a shared script.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    script: Arc<Script>,
}

impl ScriptedPlayer {
    /// Play from `script`.
    #[must_use]
    pub fn new(script: Arc<Script>) -> Self {
        Self { script }
    }
}

impl DecisionSource for ScriptedPlayer {
    fn decide(&mut self, game: &Game, barony: BaronyId) -> TurnDecisions {
        self.script
            .decisions(game.turn(), barony)
            .cloned()
            .unwrap_or_default()
    }
}
