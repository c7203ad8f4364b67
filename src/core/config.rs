//! Run configuration
//!
//! Everything that shapes a batch of trials but is not part of the scenario
//! script itself lives here.

use clap::ValueEnum;

use crate::core::error::{Result, SimError};

/// How the final report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for one batch of trials
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of independent trials
    ///
    /// `None` defers to the scenario's own default.
    pub trials: Option<u64>,

    /// Seed for the per-trial ChaCha streams
    ///
    /// `None` draws a fresh seed; the seed actually used is reported so a
    /// run can be repeated exactly.
    pub seed: Option<u64>,

    /// Spread trials over the rayon thread pool
    pub parallel: bool,

    /// Below this many trials the batch runs sequentially even when
    /// `parallel` is set; pool overhead dominates tiny batches.
    pub parallel_threshold: u64,

    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: None,
            seed: None,
            parallel: true,
            parallel_threshold: 1000,
            format: OutputFormat::Text,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = Some(trials);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.trials {
            return Err(SimError::InvalidTrials(0));
        }
        Ok(())
    }

    /// Seed to use for this run, drawing one if none was configured
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Whether a batch of `trials` should use the thread pool
    pub fn use_parallel(&self, trials: u64) -> bool {
        self.parallel && trials >= self.parallel_threshold
    }
}
