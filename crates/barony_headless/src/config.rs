//! Run configuration.
//!
//! A run is described by a small RON file naming the seed for the computer
//! opponents, which baronies are played by humans or remote players, and
//! where the humans' scripted decisions live.
//!
//! ```ron
//! RunConfig(
//!     seed: 7,
//!     humans: [0, 3],
//!     remotes: [],
//!     script: Some("opening.ron"),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use barony_core::barony::{BaronyId, ControllerKind};
use barony_core::rules::BARONIES;

use crate::error::{Result, RunnerError};

/// Default seed for computer opponents.
pub const DEFAULT_SEED: u64 = 12345;

/// Configuration for one headless game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed for the computer opponents.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Baronies played by humans.
    #[serde(default)]
    pub humans: Vec<BaronyId>,
    /// Baronies played from elsewhere.
    #[serde(default)]
    pub remotes: Vec<BaronyId>,
    /// Decisions for the human baronies, if they play from a script.
    #[serde(default)]
    pub script: Option<PathBuf>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            humans: Vec::new(),
            remotes: Vec::new(),
            script: None,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a RON file.
    ///
    /// A relative script path is resolved against the configuration's
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RunnerError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_ron_str(&contents)?;

        if let (Some(script), Some(dir)) = (config.script.as_mut(), path.parent()) {
            if script.is_relative() {
                *script = dir.join(script.as_path());
            }
        }
        Ok(config)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Ok(ron::from_str(ron)?)
    }

    /// Who controls each barony under this configuration.
    ///
    /// Baronies listed as both human and remote are human.
    #[must_use]
    pub fn controllers(&self) -> [ControllerKind; BARONIES] {
        let mut kinds = [ControllerKind::Computer; BARONIES];
        for id in &self.remotes {
            kinds[id.index()] = ControllerKind::Remote;
        }
        for id in &self.humans {
            kinds[id.index()] = ControllerKind::Human;
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_all_computer() {
        let config = RunConfig::default();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.controllers(), [ControllerKind::Computer; BARONIES]);
    }

    #[test]
    fn test_parse_from_ron() {
        let config = RunConfig::from_ron_str(
            r#"
            RunConfig(
                seed: 99,
                humans: [0, 3],
                remotes: [3, 7],
            )
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 99);
        assert!(config.script.is_none());
        let kinds = config.controllers();
        assert_eq!(kinds[0], ControllerKind::Human);
        assert_eq!(kinds[3], ControllerKind::Human);
        assert_eq!(kinds[7], ControllerKind::Remote);
        assert_eq!(kinds[1], ControllerKind::Computer);
    }

    #[test]
    fn test_out_of_roster_barony_rejected() {
        assert!(RunConfig::from_ron_str("RunConfig(humans: [8])").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RunConfig::load("/nonexistent/run.ron"),
            Err(RunnerError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_script_path_resolved_against_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");
        std::fs::write(&path, r#"RunConfig(script: Some("moves.ron"))"#).unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.script, Some(dir.path().join("moves.ron")));
        assert_eq!(config.seed, DEFAULT_SEED);
    }
}
