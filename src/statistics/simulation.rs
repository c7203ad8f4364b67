//! Batch driver: many independent trials of one scenario

use std::time::Instant;

use rayon::prelude::*;

use crate::core::config::RunConfig;
use crate::core::dice::SeededDice;
use crate::core::error::Result;
use crate::scenario::{run_trial, Scenario, TrialOutcome};
use crate::statistics::output::SimulationReport;
use crate::statistics::tally::Tally;

/// One trial on its own die stream
///
/// Events logged during the trial carry its index, so interleaved traces
/// from parallel workers can be told apart.
pub fn trial(scenario: &Scenario, seed: u64, index: u64) -> TrialOutcome {
    let _span = tracing::debug_span!("trial", index).entered();
    let mut dice = SeededDice::for_trial(seed, index);
    run_trial(scenario, &mut dice)
}

/// Run `trials` trials and tally the outcomes
///
/// Trial `i` always reads stream `i` of `seed`, so the tally is the same
/// whether the batch runs on one thread or many.
pub fn run_trials(scenario: &Scenario, trials: u64, seed: u64, parallel: bool) -> Tally {
    let stages = scenario.stages.len();

    if parallel {
        (0..trials)
            .into_par_iter()
            .fold(
                || Tally::new(stages),
                |mut tally, index| {
                    tally.record(&trial(scenario, seed, index));
                    tally
                },
            )
            .reduce(|| Tally::new(stages), Tally::merge)
    } else {
        let mut tally = Tally::new(stages);
        for index in 0..trials {
            tally.record(&trial(scenario, seed, index));
        }
        tally
    }
}

/// Run the simulation described by `config` against `scenario`
pub fn simulate(scenario: &Scenario, config: &RunConfig) -> Result<SimulationReport> {
    config.validate()?;
    scenario.validate()?;

    let trials = config.trials.unwrap_or(scenario.trials);
    let seed = config.resolve_seed();
    let parallel = config.use_parallel(trials);

    tracing::info!(
        scenario = %scenario.title,
        trials,
        seed,
        parallel,
        "Starting simulation"
    );

    let start = Instant::now();
    let tally = run_trials(scenario, trials, seed, parallel);
    let elapsed = start.elapsed();

    tracing::info!(
        deaths = tally.deaths,
        elapsed_ms = elapsed.as_millis() as u64,
        "Simulation complete"
    );

    Ok(SimulationReport::new(scenario, &tally, seed, elapsed))
}
