//! Simulation report and serialization

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use crate::character::StartingStats;
use crate::core::error::Result;
use crate::scenario::Scenario;
use crate::statistics::tally::Tally;

/// Mortality at one stage
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageMortality {
    pub index: usize,
    pub name: String,
    pub deaths: u64,
    /// Trials alive on arrival
    pub reached: u64,
    /// Percent of all trials that died here
    pub percent_of_trials: f64,
    /// Percent of all deaths that happened here
    pub percent_of_deaths: f64,
    /// Percent of those arriving alive that died here
    pub percent_of_reaching: f64,
}

/// Complete simulation output
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub title: String,
    pub seed: u64,
    pub hero: StartingStats,
    pub trials: u64,
    pub survivors: u64,
    pub survival_percent: f64,
    /// Deaths after the final checkpoint
    pub unstaged_deaths: u64,
    /// Only stages where at least one trial died
    pub stages: Vec<StageMortality>,
    pub simulation_time_ms: u64,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

impl SimulationReport {
    pub fn new(scenario: &Scenario, tally: &Tally, seed: u64, elapsed: Duration) -> Self {
        let stages = tally
            .stage_deaths
            .iter()
            .enumerate()
            .filter(|(_, deaths)| **deaths > 0)
            .map(|(index, &deaths)| {
                let reached = tally.reaching(index);
                StageMortality {
                    index,
                    name: scenario.stage_name(index).to_string(),
                    deaths,
                    reached,
                    percent_of_trials: percent(deaths, tally.trials),
                    percent_of_deaths: percent(deaths, tally.deaths),
                    percent_of_reaching: percent(deaths, reached),
                }
            })
            .collect();

        Self {
            title: scenario.title.clone(),
            seed,
            hero: scenario.hero.clone(),
            trials: tally.trials,
            survivors: tally.survivors(),
            survival_percent: percent(tally.survivors(), tally.trials),
            unstaged_deaths: tally.unstaged_deaths(),
            stages,
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let hero = &self.hero;
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(
            out,
            "Initial stats: {}/{}/{} with {} provisions and {} potions",
            hero.skill, hero.stamina, hero.luck, hero.provisions, hero.potions
        );
        let _ = writeln!(out, "Trials: {} (seed {})", self.trials, self.seed);
        let _ = writeln!(out, "Survival: {:.2}%", self.survival_percent);
        let _ = writeln!(out);

        if !self.stages.is_empty() {
            let _ = writeln!(
                out,
                "{:>5}  {:<18} {:>9} {:>10} {:>10}",
                "stage", "name", "of all", "of deaths", "of those"
            );
        }
        for stage in &self.stages {
            let _ = writeln!(
                out,
                "{:>5}  {:<18} {:>8.2}% {:>9.2}% {:>9.2}%",
                stage.index,
                stage.name,
                stage.percent_of_trials,
                stage.percent_of_deaths,
                stage.percent_of_reaching
            );
        }
        if self.unstaged_deaths > 0 {
            let _ = writeln!(
                out,
                "{} deaths after the final stage",
                self.unstaged_deaths
            );
        }
        out
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulated {} trials in {}ms, {:.2}% survived",
            self.trials, self.simulation_time_ms, self.survival_percent
        )
    }
}
