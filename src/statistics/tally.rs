//! Outcome counts for a batch of trials

use serde::Serialize;

use crate::scenario::TrialOutcome;

/// Deaths per stage over some number of trials
///
/// Tallies from separate workers merge by plain addition, so the order in
/// which partial results come back does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub trials: u64,
    pub deaths: u64,
    /// First-death counts indexed by stage
    pub stage_deaths: Vec<u64>,
}

impl Tally {
    pub fn new(stages: usize) -> Self {
        Self {
            trials: 0,
            deaths: 0,
            stage_deaths: vec![0; stages],
        }
    }

    pub fn record(&mut self, outcome: &TrialOutcome) {
        self.trials += 1;
        if !outcome.died {
            return;
        }
        self.deaths += 1;
        if let Some(stage) = outcome.death_stage {
            if let Some(count) = self.stage_deaths.get_mut(stage) {
                *count += 1;
            }
        }
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        if other.stage_deaths.len() > self.stage_deaths.len() {
            self.stage_deaths.resize(other.stage_deaths.len(), 0);
        }
        self.trials += other.trials;
        self.deaths += other.deaths;
        for (mine, theirs) in self.stage_deaths.iter_mut().zip(other.stage_deaths) {
            *mine += theirs;
        }
        self
    }

    pub fn survivors(&self) -> u64 {
        self.trials - self.deaths
    }

    /// Deaths that happened after the last checkpoint was passed
    pub fn unstaged_deaths(&self) -> u64 {
        self.deaths - self.stage_deaths.iter().sum::<u64>()
    }

    /// Trials still alive on arrival at `stage`
    pub fn reaching(&self, stage: usize) -> u64 {
        let earlier: u64 = self.stage_deaths.iter().take(stage).sum();
        self.trials - earlier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn died_at(stage: usize) -> TrialOutcome {
        TrialOutcome {
            died: true,
            death_stage: Some(stage),
        }
    }

    #[test]
    fn test_record_outcomes() {
        let mut tally = Tally::new(3);
        tally.record(&TrialOutcome::default());
        tally.record(&died_at(1));
        tally.record(&died_at(1));
        tally.record(&TrialOutcome {
            died: true,
            death_stage: None,
        });

        assert_eq!(tally.trials, 4);
        assert_eq!(tally.deaths, 3);
        assert_eq!(tally.stage_deaths, vec![0, 2, 0]);
        assert_eq!(tally.survivors(), 1);
        assert_eq!(tally.unstaged_deaths(), 1);
    }

    #[test]
    fn test_reaching_subtracts_earlier_stages_only() {
        let mut tally = Tally::new(3);
        for outcome in [died_at(0), died_at(1), died_at(1), TrialOutcome::default()] {
            tally.record(&outcome);
        }

        assert_eq!(tally.reaching(0), 4);
        assert_eq!(tally.reaching(1), 3);
        assert_eq!(tally.reaching(2), 1);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a = Tally::new(2);
        a.record(&died_at(0));
        let mut b = Tally::new(2);
        b.record(&died_at(1));
        b.record(&TrialOutcome::default());

        let merged = a.clone().merge(b.clone());
        assert_eq!(merged.trials, 3);
        assert_eq!(merged.deaths, 2);
        assert_eq!(merged.stage_deaths, vec![1, 1]);
        assert_eq!(merged, b.merge(a));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let mut a = Tally::new(2);
        a.record(&died_at(1));
        assert_eq!(a.clone().merge(Tally::new(2)), a);
    }
}
