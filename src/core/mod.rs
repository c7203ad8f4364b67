pub mod config;
pub mod dice;
pub mod error;

pub use config::{OutputFormat, RunConfig};
pub use dice::{DieSource, ScriptedDice, SeededDice};
pub use error::{Result, SimError};
