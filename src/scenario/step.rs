//! Scenario steps
//!
//! A walkthrough is an ordered list of steps. Branches, tables and loops
//! nest further step lists, so a whole book reads as one data tree.

use serde::Deserialize;

use crate::character::Stat;
use crate::combat::EncounterModifiers;
use crate::scenario::amount::Amount;
use crate::scenario::condition::Condition;

/// Default cap on loop iterations
pub const DEFAULT_LOOP_LIMIT: u32 = 10_000;

fn default_loop_limit() -> u32 {
    DEFAULT_LOOP_LIMIT
}

fn one_die() -> u32 {
    1
}

fn always() -> Condition {
    Condition::Always
}

/// A single fight
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub name: Option<String>,
    pub skill: i32,
    pub stamina: Amount,
    #[serde(default)]
    pub modifiers: EncounterModifiers,
}

/// One row of a roll table: the steps taken when the roll lands in range
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableRow {
    pub at_least: Option<i32>,
    pub at_most: Option<i32>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl TableRow {
    pub fn matches(&self, roll: i32) -> bool {
        self.at_least.map_or(true, |min| roll >= min) && self.at_most.map_or(true, |max| roll <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Change a stat; stamina changes can drink a potion or kill
    Adjust { stat: Stat, amount: Amount },
    /// Permanently raise a stat's ceiling
    RaiseCeiling { stat: Stat, amount: i32 },
    /// Gain or lose provisions without eating
    Provisions { amount: i32 },
    SetProvisions { count: i32 },
    /// Eat one provision if hurt
    Eat { amount: i32 },
    /// Eat whole portions to recover between encounters
    Rest,
    /// A fatal wound; only a potion saves the hero
    Slay,
    /// The hero carries a shield into every later fight
    TakeShield,
    If {
        test: Condition,
        #[serde(default)]
        then: Vec<Step>,
        #[serde(default, rename = "else")]
        otherwise: Vec<Step>,
    },
    /// Roll once and take the first row whose range holds the roll
    Table {
        #[serde(default = "one_die")]
        dice: u32,
        outcomes: Vec<TableRow>,
    },
    Combat(Encounter),
    /// Run the body while the condition holds and the hero lives
    Loop {
        #[serde(rename = "while", default = "always")]
        condition: Condition,
        body: Vec<Step>,
        #[serde(default = "default_loop_limit")]
        max_iterations: u32,
    },
    /// Run the body a rolled number of times
    Repeat { times: Amount, body: Vec<Step> },
    /// Leave the innermost loop
    Break,
    /// Deaths up to here are attributed to this stage
    Checkpoint { stage: usize },
}

impl Step {
    pub fn adjust(stat: Stat, amount: impl Into<Amount>) -> Self {
        Step::Adjust {
            stat,
            amount: amount.into(),
        }
    }

    pub fn combat(skill: i32, stamina: impl Into<Amount>) -> Self {
        Step::Combat(Encounter {
            name: None,
            skill,
            stamina: stamina.into(),
            modifiers: EncounterModifiers::default(),
        })
    }

    pub fn combat_with(skill: i32, stamina: impl Into<Amount>, modifiers: EncounterModifiers) -> Self {
        Step::Combat(Encounter {
            name: None,
            skill,
            stamina: stamina.into(),
            modifiers,
        })
    }

    pub fn when(test: Condition, then: Vec<Step>, otherwise: Vec<Step>) -> Self {
        Step::If {
            test,
            then,
            otherwise,
        }
    }

    pub fn looping(condition: Condition, body: Vec<Step>) -> Self {
        Step::Loop {
            condition,
            body,
            max_iterations: DEFAULT_LOOP_LIMIT,
        }
    }

    pub fn checkpoint(stage: usize) -> Self {
        Step::Checkpoint { stage }
    }

    /// Nested step lists directly under this step
    pub fn children(&self) -> Vec<&[Step]> {
        match self {
            Step::If {
                then, otherwise, ..
            } => vec![then.as_slice(), otherwise.as_slice()],
            Step::Table { outcomes, .. } => outcomes.iter().map(|row| row.steps.as_slice()).collect(),
            Step::Loop { body, .. } | Step::Repeat { body, .. } => vec![body.as_slice()],
            _ => Vec::new(),
        }
    }
}
