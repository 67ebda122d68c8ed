//! Echo Engine CLI
//!
//! Thin command-line surface over the analysis engine. Translates
//! comma-separated number lists into the engine's sequence contract and
//! prints structured results; owns no analysis logic of its own.
//!
//! # Commands
//!
//! - `predict`: analyze one sequence and extrapolate forward
//! - `batch`: analyze several sequences, reporting per-sequence outcomes
//! - `demo`: run the built-in demonstration sequences
//! - `history show|clear`: inspect or reset the persisted history
//! - `stats`: history, accuracy, and cache statistics
//! - `bench`: micro-benchmarks of the detection and guard paths

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use echo_engine_core::EngineConfig;

mod commands;

/// Echo Engine - numeric sequence pattern detection and prediction
#[derive(Parser)]
#[command(name = "echo-engine")]
#[command(version)]
#[command(about = "Detect arithmetic, geometric, and polynomial progressions and predict ahead")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sequence and predict the next values
    Predict {
        /// Comma-separated numbers, e.g. "3,6,9,12"
        sequence: String,

        /// Forward steps to predict (configured default when omitted)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze several sequences without stopping on failures
    Batch {
        /// Comma-separated number lists, one argument per sequence
        #[arg(required = true)]
        sequences: Vec<String>,

        /// Forward steps to predict per sequence
        #[arg(short, long)]
        steps: Option<usize>,
    },

    /// Run the built-in demonstration sequences
    Demo,

    /// Inspect or reset the persisted analysis history
    History {
        #[command(subcommand)]
        action: commands::HistoryAction,
    },

    /// Show history, accuracy, and cache statistics
    Stats {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run micro-benchmarks over the detection and guard paths
    Bench {
        /// Iterations per benchmark
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Predict {
            sequence,
            steps,
            json,
        } => commands::predict(&config, &sequence, steps, json),
        Commands::Batch { sequences, steps } => commands::batch(&config, &sequences, steps),
        Commands::Demo => commands::demo(&config),
        Commands::History { action } => commands::history(&config, action),
        Commands::Stats { json } => commands::stats(&config, json),
        Commands::Bench { iterations } => commands::bench(iterations),
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}
