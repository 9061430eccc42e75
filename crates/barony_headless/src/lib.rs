//! Headless game runner for batch play and determinism checks.
//!
//! This crate plays whole games without a terminal. Computer baronies are
//! driven by a seeded opponent, human baronies replay a RON script, and
//! remote baronies stand idle. After each turn a summary is produced for
//! logging, text output or JSON lines:
//!
//! - **stdout**: Turn summaries (text or JSON)
//! - **stderr**: Logs
//!
//! # Example
//!
//! ```bash
//! # Eight computer baronies with a fixed seed
//! cargo run -p barony_headless -- run --seed 7
//!
//! # Barony 1 played from a script, JSON output
//! cargo run -p barony_headless -- run --human 1 --script opening.ron --json
//!
//! # Verify a seed replays identically
//! cargo run -p barony_headless -- verify --seed 7 --runs 5
//! ```

pub mod config;
pub mod error;
pub mod opponent;
pub mod runner;
pub mod script;
pub mod summary;

pub use config::RunConfig;
pub use error::{Result, RunnerError};
pub use opponent::ComputerOpponent;
pub use runner::{Controller, GameRunner};
pub use script::{Script, ScriptedPlayer};
pub use summary::{BaronySummary, GameSummary, TurnSummary};
