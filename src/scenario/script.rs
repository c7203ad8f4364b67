//! A complete walkthrough script

use serde::Deserialize;

use crate::character::StartingStats;
use crate::combat::Tactics;
use crate::core::error::{Result, SimError};
use crate::scenario::step::Step;

fn default_trials() -> u64 {
    100_000
}

/// One book's walkthrough: starting hero, stage names and the step list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    pub title: String,
    /// Trials to run when the caller does not say
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Stage names, indexed by checkpoint
    pub stages: Vec<String>,
    pub hero: StartingStats,
    #[serde(default)]
    pub tactics: Tactics,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(title: impl Into<String>, hero: StartingStats, stages: Vec<String>, steps: Vec<Step>) -> Self {
        Self {
            title: title.into(),
            trials: default_trials(),
            stages,
            hero,
            tactics: Tactics::default(),
            steps,
        }
    }

    pub fn stage_name(&self, stage: usize) -> &str {
        self.stages.get(stage).map(String::as_str).unwrap_or("?")
    }

    /// Check the script is runnable before any trial starts
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(SimError::InvalidScenario(format!(
                "'{}' declares no stages",
                self.title
            )));
        }
        if self.trials == 0 {
            return Err(SimError::InvalidTrials(0));
        }

        let hero = &self.hero;
        if hero.skill <= 0 || hero.stamina <= 0 || hero.luck <= 0 {
            return Err(SimError::InvalidScenario(format!(
                "starting stats must be positive, got {}/{}/{}",
                hero.skill, hero.stamina, hero.luck
            )));
        }
        if hero.provisions < 0 || hero.potions < 0 {
            return Err(SimError::InvalidScenario(
                "starting provisions and potions cannot be negative".into(),
            ));
        }

        self.validate_steps(&self.steps, 0)
    }

    fn validate_steps(&self, steps: &[Step], loop_depth: usize) -> Result<()> {
        for step in steps {
            match step {
                Step::Checkpoint { stage } if *stage >= self.stages.len() => {
                    return Err(SimError::InvalidScenario(format!(
                        "checkpoint {} is out of range ({} stages)",
                        stage,
                        self.stages.len()
                    )));
                }
                Step::Break if loop_depth == 0 => {
                    return Err(SimError::InvalidScenario("break outside of a loop".into()));
                }
                Step::Loop { max_iterations: 0, .. } => {
                    return Err(SimError::InvalidScenario("loop with max_iterations = 0".into()));
                }
                _ => {}
            }

            let depth = match step {
                Step::Loop { .. } | Step::Repeat { .. } => loop_depth + 1,
                _ => loop_depth,
            };
            for child in step.children() {
                self.validate_steps(child, depth)?;
            }
        }
        Ok(())
    }

    /// Number of checkpoint steps anywhere in the script
    pub fn checkpoint_count(&self) -> usize {
        fn count(steps: &[Step]) -> usize {
            steps
                .iter()
                .map(|step| {
                    let own = usize::from(matches!(step, Step::Checkpoint { .. }));
                    own + step.children().into_iter().map(count).sum::<usize>()
                })
                .sum()
        }
        count(&self.steps)
    }
}
