//! Headless barony game runner.
//!
//! Plays complete games without a terminal, for batch play and CI.
//!
//! # Usage
//!
//! ```bash
//! # Run a game with eight computer baronies
//! cargo run -p barony_headless -- run --seed 7
//!
//! # Run from a configuration file, overriding its seed
//! cargo run -p barony_headless -- run --config run.ron --seed 8
//!
//! # Play barony 1 from a script and emit JSON lines
//! cargo run -p barony_headless -- run --human 1 --script opening.ron --json
//!
//! # Verify determinism by replaying one seed several times
//! cargo run -p barony_headless -- verify --seed 7 --runs 5
//! ```
//!
//! Output (stdout): turn summaries, as text or one JSON object per line
//! Logs (stderr): `RUST_LOG` filter, or `info` (`debug` with `--verbose`)

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use barony_core::barony::BaronyId;
use barony_headless::{GameRunner, GameSummary, Result, RunConfig};

#[derive(Parser)]
#[command(name = "barony_headless")]
#[command(about = "Headless barony game runner for batch play and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game to the end
    Run {
        /// Run configuration file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the computer opponents
        #[arg(long)]
        seed: Option<u64>,

        /// Barony played by a human (1-8); may be repeated
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        human: Vec<u8>,

        /// Script of decisions for the human baronies (RON)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Emit one JSON object per turn instead of text
        #[arg(long)]
        json: bool,

        /// Save the whole game summary as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify determinism by running the same seed multiple times
    Verify {
        /// Run configuration file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed to verify
        #[arg(long)]
        seed: Option<u64>,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for summaries)
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let result = match cli.command {
        Some(Commands::Run {
            config,
            seed,
            human,
            script,
            json,
            output,
        }) => cmd_run(config, seed, &human, script, json, output),
        Some(Commands::Verify { config, seed, runs }) => cmd_verify(config, seed, runs),
        None => cmd_run(None, None, &[], None, false, None),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Run failed");
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }
}

/// Build the run configuration from a file and command-line overrides.
fn load_config(
    path: Option<PathBuf>,
    seed: Option<u64>,
    humans: &[u8],
    script: Option<PathBuf>,
) -> Result<RunConfig> {
    let mut config = match path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    for &key in humans {
        let id = BaronyId::new(usize::from(key) - 1)?;
        if !config.humans.contains(&id) {
            config.humans.push(id);
        }
    }
    if script.is_some() {
        config.script = script;
    }
    Ok(config)
}

/// Play a single game, printing each turn.
fn cmd_run(
    config: Option<PathBuf>,
    seed: Option<u64>,
    humans: &[u8],
    script: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config, seed, humans, script)?;
    let mut runner = GameRunner::new(&config)?;

    let mut encode_error = None;
    let summary = runner.run_with(|turn| {
        if json {
            match serde_json::to_string(turn) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    encode_error.get_or_insert(e);
                }
            }
        } else {
            println!("{}", turn.render());
        }
    })?;
    if let Some(e) = encode_error {
        return Err(e.into());
    }

    if !json {
        print_final_standings(&summary);
    }
    if let Some(path) = output {
        summary.save(&path)?;
        tracing::info!(path = %path.display(), "Game summary saved");
    }
    Ok(())
}

fn print_final_standings(summary: &GameSummary) {
    println!("=== Final standings ===");
    for (place, name) in summary.final_standings.iter().enumerate() {
        println!("{:>2}. {name}", place + 1);
    }
    if let Some(winner) = summary.winner() {
        println!("{winner} holds the most land.");
    }
}

/// Replay one seed several times and compare final hashes.
fn cmd_verify(config: Option<PathBuf>, seed: Option<u64>, runs: u32) -> Result<()> {
    let config = load_config(config, seed, &[], None)?;
    tracing::info!(seed = config.seed, runs, "Verifying determinism");

    let mut hashes = Vec::with_capacity(runs as usize);
    for run in 0..runs {
        let summary = GameRunner::new(&config)?.run()?;
        tracing::debug!(run, hash = summary.final_state_hash, "Run finished");
        hashes.push(summary.final_state_hash);
    }

    let mut unique = hashes.clone();
    unique.sort_unstable();
    unique.dedup();

    if unique.len() <= 1 {
        println!(
            "PASS: {runs} runs of seed {} produced identical state ({:#018x})",
            config.seed,
            hashes.first().copied().unwrap_or_default()
        );
        Ok(())
    } else {
        println!(
            "FAIL: {runs} runs of seed {} produced {} different states: {hashes:?}",
            config.seed,
            unique.len()
        );
        std::process::exit(2);
    }
}
