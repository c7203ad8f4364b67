//! Monte Carlo aggregation over many trials

pub mod output;
pub mod simulation;
pub mod tally;

pub use output::{SimulationReport, StageMortality};
pub use simulation::{run_trials, simulate, trial};
pub use tally::Tally;
