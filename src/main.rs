//! Lumicell - memory-cell device characterization runner.
//!
//! Loads a named experiment setup, runs the device characterization, and
//! persists the result record under a timestamped results directory.
//!
//! # Usage
//!
//! ```bash
//! lumicell setup.json --output-root results
//! ```

use std::path::PathBuf;

use clap::Parser;
use lumicell_core::error::Result;
use lumicell_core::experiment::{self, ExperimentConfig};

/// Memory-cell device characterization runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the experiment setup file (.json)
    #[arg(value_name = "SETUP_FILE")]
    setup_file: PathBuf,

    /// Root directory for persisted results
    #[arg(short, long, default_value = "results")]
    output_root: PathBuf,

    /// Print the report without persisting it
    #[arg(long)]
    no_save: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load the setup and run the characterization
    let config = ExperimentConfig::from_path(&args.setup_file)?;
    let record = experiment::run(&config)?;

    // Console report
    println!("setup: {} / {}", record.setup, record.name);
    println!("model: {}", config.model);
    if let Some(gammas) = record.results.get("gammas_ghz") {
        println!("gammas (GHz): {gammas}");
    }
    if let Some(tau) = record.results.get("tau_gate_ns") {
        println!("gate time constant (ns): {tau}");
    }
    if let Some(gain) = record.results.get("gain_ratio") {
        println!("inverse gain coefficient: {gain}");
    }

    if args.no_save {
        println!("{}", serde_json::to_string_pretty(&record.results).unwrap_or_default());
    } else {
        let path = record.save(&args.output_root)?;
        println!("saved: {}", path.display());
    }

    Ok(())
}
