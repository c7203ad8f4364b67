//! Scenario scripts and the runner that plays them
//!
//! A scenario is one book's walkthrough written as data: a starting hero,
//! named stages, and a tree of steps. The runner threads a single hero
//! through it and reports whether, and at which stage, they died.

pub mod amount;
pub mod condition;
pub mod loader;
pub mod runner;
pub mod script;
pub mod step;

pub use amount::Amount;
pub use condition::Condition;
pub use loader::{builtin_names, load_builtin, load_scenario, load_scenario_file, parse_scenario};
pub use runner::{run_trial, ScenarioRunner, TrialOutcome};
pub use script::Scenario;
pub use step::{Encounter, Step, TableRow, DEFAULT_LOOP_LIMIT};
