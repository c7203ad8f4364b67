//! Gamebook Sim - Entry Point
//!
//! Loads a walkthrough, plays it many times with fresh dice and prints the
//! chance of surviving along with where the dead fell.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gamebook_sim::core::config::{OutputFormat, RunConfig};
use gamebook_sim::core::error::Result;
use gamebook_sim::scenario::{builtin_names, load_builtin, load_scenario};
use gamebook_sim::statistics::simulate;

/// Survival odds for a scripted gamebook walkthrough
#[derive(Parser, Debug)]
#[command(name = "gamebook-sim")]
#[command(about = "Estimate survival odds and per-stage mortality for a gamebook walkthrough")]
struct Args {
    /// Built-in scenario name or path to a scenario TOML file
    #[arg(long, default_value = "warlock")]
    scenario: String,

    /// Number of trials (defaults to the scenario's own count)
    #[arg(long)]
    trials: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run every trial on the current thread
    #[arg(long)]
    sequential: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print each trial's state at every stage
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List the built-in scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "gamebook_sim=debug"
    } else {
        "gamebook_sim=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.list {
        for name in builtin_names() {
            let scenario = load_builtin(name)?;
            println!(
                "{:<10} {} ({} stages, {} trials)",
                name,
                scenario.title,
                scenario.stages.len(),
                scenario.trials
            );
        }
        return Ok(());
    }

    let config = RunConfig {
        trials: args.trials,
        seed: args.seed,
        parallel: !args.sequential,
        format: args.format,
        ..RunConfig::default()
    };
    config.validate()?;

    let scenario = load_scenario(&args.scenario)?;
    let report = simulate(&scenario, &config)?;

    match config.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    tracing::info!("{}", report.summary());

    Ok(())
}
