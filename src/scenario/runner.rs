//! Threads one hero through a scenario
//!
//! The runner interprets the step tree against a single [`CharacterState`].
//! Once the hero is dead only the route to the next checkpoint matters: the
//! first checkpoint reached after death, however deeply nested, becomes the
//! trial's death stage and the run stops there.

use crate::character::CharacterState;
use crate::combat::{resolve_combat, EncounterModifiers, Opponent};
use crate::core::dice::DieSource;
use crate::scenario::script::Scenario;
use crate::scenario::step::{Encounter, Step};

/// What a single trial produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrialOutcome {
    pub died: bool,
    /// First checkpoint reached dead. `None` for survivors and for deaths
    /// after the last checkpoint.
    pub death_stage: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    /// Leave the innermost loop
    Break,
    /// Death stage recorded; stop the run
    Halt,
}

pub struct ScenarioRunner<'a, D: DieSource> {
    scenario: &'a Scenario,
    dice: &'a mut D,
    hero: CharacterState,
    shield: bool,
    death_stage: Option<usize>,
}

impl<'a, D: DieSource> ScenarioRunner<'a, D> {
    /// A runner with a fresh hero built from the scenario's starting stats
    pub fn new(scenario: &'a Scenario, dice: &'a mut D) -> Self {
        Self {
            scenario,
            dice,
            hero: CharacterState::new(&scenario.hero),
            shield: false,
            death_stage: None,
        }
    }

    pub fn hero(&self) -> &CharacterState {
        &self.hero
    }

    /// Execute the whole script
    pub fn run(&mut self) -> TrialOutcome {
        let scenario = self.scenario;
        self.run_steps(&scenario.steps);
        TrialOutcome {
            died: self.hero.has_died(),
            death_stage: self.death_stage,
        }
    }

    fn run_steps(&mut self, steps: &[Step]) -> Flow {
        for step in steps {
            let flow = if self.hero.has_died() {
                self.seek_checkpoint(step)
            } else {
                self.execute(step)
            };
            if flow != Flow::Next {
                return flow;
            }
        }
        Flow::Next
    }

    /// Walk on from a death until a checkpoint is reached.
    ///
    /// Branches and tables still pick their outcome, and a loop or repeat
    /// body is walked once. Everything else is skipped.
    fn seek_checkpoint(&mut self, step: &Step) -> Flow {
        match step {
            Step::Checkpoint { stage } => self.checkpoint(*stage),
            Step::If { .. } | Step::Table { .. } => self.execute(step),
            Step::Loop { body, .. } | Step::Repeat { body, .. } => match self.run_steps(body) {
                Flow::Halt => Flow::Halt,
                Flow::Next | Flow::Break => Flow::Next,
            },
            _ => Flow::Next,
        }
    }

    fn execute(&mut self, step: &Step) -> Flow {
        match step {
            Step::Adjust { stat, amount } => {
                let delta = amount.roll(self.dice);
                self.hero.apply(*stat, delta);
            }
            Step::RaiseCeiling { stat, amount } => self.hero.raise_ceiling(*stat, *amount),
            Step::Provisions { amount } => self.hero.adjust_provisions(*amount),
            Step::SetProvisions { count } => self.hero.set_provisions(*count),
            Step::Eat { amount } => self.hero.eat(*amount),
            Step::Rest => self.hero.rest_and_heal(),
            Step::Slay => self.hero.suffer_fatal_wound(),
            Step::TakeShield => self.shield = true,
            Step::If {
                test,
                then,
                otherwise,
            } => {
                let branch = if test.evaluate(&mut self.hero, self.dice) {
                    then
                } else {
                    otherwise
                };
                return self.run_steps(branch);
            }
            Step::Table { dice, outcomes } => {
                let roll = self.dice.roll(*dice);
                if let Some(row) = outcomes.iter().find(|row| row.matches(roll)) {
                    return self.run_steps(&row.steps);
                }
            }
            Step::Combat(encounter) => self.fight(encounter),
            Step::Loop {
                condition,
                body,
                max_iterations,
            } => {
                let mut iterations = 0;
                while self.hero.is_alive() && condition.evaluate(&mut self.hero, self.dice) {
                    if iterations == *max_iterations {
                        tracing::warn!(iterations, "loop iteration limit reached");
                        break;
                    }
                    iterations += 1;
                    match self.run_steps(body) {
                        Flow::Next => {}
                        Flow::Break => break,
                        Flow::Halt => return Flow::Halt,
                    }
                }
            }
            Step::Repeat { times, body } => {
                let count = times.roll(self.dice);
                for _ in 0..count {
                    if self.hero.has_died() {
                        break;
                    }
                    match self.run_steps(body) {
                        Flow::Next => {}
                        Flow::Break => break,
                        Flow::Halt => return Flow::Halt,
                    }
                }
            }
            Step::Break => return Flow::Break,
            Step::Checkpoint { stage } => return self.checkpoint(*stage),
        }
        Flow::Next
    }

    fn fight(&mut self, encounter: &Encounter) {
        let opponent = Opponent::new(encounter.skill, encounter.stamina.roll(self.dice));

        let with_shield;
        let modifiers = if self.shield && !encounter.modifiers.shield {
            with_shield = EncounterModifiers {
                shield: true,
                ..encounter.modifiers.clone()
            };
            &with_shield
        } else {
            &encounter.modifiers
        };

        let report = resolve_combat(
            &mut self.hero,
            opponent,
            modifiers,
            &self.scenario.tactics,
            self.dice,
        );
        tracing::trace!(
            opponent = encounter.name.as_deref().unwrap_or("opponent"),
            stamina = %encounter.stamina,
            outcome = ?report.outcome,
            rounds = report.rounds,
            "combat resolved"
        );
    }

    fn checkpoint(&mut self, stage: usize) -> Flow {
        let dead = self.hero.has_died();
        tracing::debug!(
            "Stage {} ({}): {} ({})",
            stage,
            self.scenario.stage_name(stage),
            self.hero.summary(),
            if dead { 'X' } else { ' ' }
        );

        if dead && self.death_stage.is_none() {
            self.death_stage = Some(stage);
            return Flow::Halt;
        }
        Flow::Next
    }
}

/// Run one trial of `scenario` on the given dice
pub fn run_trial<D: DieSource>(scenario: &Scenario, dice: &mut D) -> TrialOutcome {
    ScenarioRunner::new(scenario, dice).run()
}
