//! qkdsim - BB84 quantum key distribution simulator
//!
//! Command-line front end: lists scenarios, runs one, or drives session mode.
//! Results are printed to stdout as JSON; logs go to stderr.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use qkdsim::{
    Bb84Session, LatestResults, Scenario, SessionRequest, SimulationParams, Simulator, SimulatorConfig,
    scenario_catalog,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// qkdsim - BB84 quantum key distribution simulator
#[derive(Parser, Debug)]
#[command(name = "qkdsim")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the selectable scenarios with their parameter ranges
    Scenarios,

    /// Run one scenario
    Run {
        /// Scenario id (ideal, error-only, error-eve, decoherence-free, detailed)
        scenario: Scenario,

        /// Number of qubits to transmit
        #[arg(long)]
        qubits: Option<usize>,

        /// Channel bit-flip probability
        #[arg(long)]
        error_rate: Option<f64>,

        /// Fraction of qubits Eve intercepts
        #[arg(long)]
        eve_fraction: Option<f64>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Show every qubit of the detailed scenario
        #[arg(long)]
        show_all: bool,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run session mode and inspect the stored run
    Session {
        /// Number of rounds
        #[arg(long, default_value_t = 100)]
        n_qubits: usize,

        /// Channel bit-flip probability
        #[arg(long, default_value_t = 0.0)]
        noise_level: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Print a single round instead of the statistics
        #[arg(long, conflicts_with = "raw")]
        round: Option<usize>,

        /// Print the raw run data instead of the statistics
        #[arg(long)]
        raw: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Scenarios => print_json(&scenario_catalog())?,
        Commands::Run { scenario, qubits, error_rate, eve_fraction, seed, show_all, config } => {
            let config = match config {
                Some(path) => SimulatorConfig::load(&path)?,
                None => SimulatorConfig::default(),
            };
            debug!(?config, "configuration loaded");

            let defaults = config.defaults;
            let params = SimulationParams::new(
                qubits.unwrap_or(defaults.qubit_count),
                error_rate.unwrap_or(defaults.error_rate),
                eve_fraction.unwrap_or(defaults.eve_fraction),
            );
            let mut simulator = Simulator::from_config(&config).with_show_all(show_all || config.show_all);
            if let Some(seed) = seed {
                simulator = simulator.with_seed(seed);
            }
            print_json(&simulator.run(scenario, &params)?)?;
        }
        Commands::Session { n_qubits, noise_level, seed, round, raw } => {
            let session = Bb84Session::new(Arc::new(LatestResults::new()));
            session.run(&SessionRequest { n_qubits, noise_level, seed })?;
            match round {
                Some(index) => print_json(&session.round(index)?)?,
                None if raw => print_json(&*session.results()?)?,
                None => print_json(&session.stats()?)?,
            }
        }
    }
    Ok(())
}
