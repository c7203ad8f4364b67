//! Branch and loop conditions
//!
//! Conditions are evaluated against the hero and the die stream. The three
//! ability tests follow the book rules (a luck test spends luck); the rest
//! are the walkthrough's own die checks and bookkeeping comparisons.

use serde::Deserialize;

use crate::character::{CharacterState, Stat};
use crate::core::dice::DieSource;

fn one_die() -> u32 {
    1
}

/// Something a step can branch or loop on
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    /// Test your skill: 2d6 at or under skill
    Skill,
    /// Test your stamina: 2d6 at or under stamina
    Stamina,
    /// Test your luck: 2d6 at or under luck, spending one point
    Luck,
    /// 2d6 at or under a stat with no side effect
    RollUnder(Stat),
    /// One 2d6 roll that must be at or under every listed stat
    SharedRoll(Vec<Stat>),
    /// Roll dice and check the total falls in a range
    Roll {
        #[serde(default = "one_die")]
        dice: u32,
        at_least: Option<i32>,
        at_most: Option<i32>,
    },
    /// Current stat strictly above a value
    Above { stat: Stat, value: i32 },
    /// Current stat strictly below a value
    Below { stat: Stat, value: i32 },
    /// Current stat under its ceiling
    BelowCeiling(Stat),
    ProvisionsAbove(i32),
    /// Every condition, left to right, stopping at the first failure
    All(Vec<Condition>),
    /// Any condition, left to right, stopping at the first success
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn evaluate(&self, hero: &mut CharacterState, dice: &mut impl DieSource) -> bool {
        match self {
            Condition::Always => true,
            Condition::Skill => hero.test_skill(dice),
            Condition::Stamina => hero.test_stamina(dice),
            Condition::Luck => hero.test_luck(dice),
            Condition::RollUnder(stat) => hero.roll_under(*stat, dice),
            Condition::SharedRoll(stats) => {
                let roll = dice.two_d6();
                stats.iter().all(|stat| roll <= hero.current(*stat))
            }
            Condition::Roll {
                dice: count,
                at_least,
                at_most,
            } => {
                let total = dice.roll(*count);
                at_least.map_or(true, |min| total >= min) && at_most.map_or(true, |max| total <= max)
            }
            Condition::Above { stat, value } => hero.current(*stat) > *value,
            Condition::Below { stat, value } => hero.current(*stat) < *value,
            Condition::BelowCeiling(stat) => hero.current(*stat) < hero.ceiling(*stat),
            Condition::ProvisionsAbove(n) => hero.provisions() > *n,
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(hero, dice)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(hero, dice)),
            Condition::Not(inner) => !inner.evaluate(hero, dice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::StartingStats;
    use crate::core::dice::ScriptedDice;

    fn hero() -> CharacterState {
        CharacterState::new(&StartingStats::new(7, 14, 7).with_provisions(2))
    }

    #[test]
    fn test_shared_roll_uses_one_roll_for_all_stats() {
        let mut state = hero();
        state.apply_stamina_change(-8);
        let condition = Condition::SharedRoll(vec![Stat::Luck, Stat::Stamina]);

        // 3+4 = 7: under luck 7 but over stamina 6
        let mut dice = ScriptedDice::new(vec![3, 4]);
        assert!(!condition.evaluate(&mut state, &mut dice));
        assert_eq!(dice.consumed(), 2);

        let mut dice = ScriptedDice::new(vec![3, 3]);
        assert!(condition.evaluate(&mut state, &mut dice));
    }

    #[test]
    fn test_roll_range() {
        let mut state = hero();
        let at_least_five = Condition::Roll {
            dice: 1,
            at_least: Some(5),
            at_most: None,
        };
        assert!(at_least_five.evaluate(&mut state, &mut ScriptedDice::new(vec![5])));
        assert!(!at_least_five.evaluate(&mut state, &mut ScriptedDice::new(vec![4])));

        let exactly_six = Condition::Roll {
            dice: 1,
            at_least: Some(6),
            at_most: Some(6),
        };
        assert!(exactly_six.evaluate(&mut state, &mut ScriptedDice::new(vec![6])));
    }

    #[test]
    fn test_all_short_circuits() {
        let mut state = hero();
        let condition = Condition::All(vec![Condition::Skill, Condition::Skill, Condition::Skill]);
        // First test fails on 6+6; the other two never roll.
        let mut dice = ScriptedDice::new(vec![6, 6, 1, 1]);
        assert!(!condition.evaluate(&mut state, &mut dice));
        assert_eq!(dice.consumed(), 2);
    }

    #[test]
    fn test_luck_condition_spends_luck() {
        let mut state = hero();
        Condition::Not(Box::new(Condition::Luck))
            .evaluate(&mut state, &mut ScriptedDice::new(vec![1]));
        assert_eq!(state.luck(), 6);
    }

    #[test]
    fn test_bookkeeping_comparisons() {
        let mut state = hero();
        let mut dice = ScriptedDice::new(vec![1]);
        assert!(!Condition::BelowCeiling(Stat::Stamina).evaluate(&mut state, &mut dice));
        assert!(Condition::ProvisionsAbove(1).evaluate(&mut state, &mut dice));
        assert!(Condition::Above {
            stat: Stat::Stamina,
            value: 1
        }
        .evaluate(&mut state, &mut dice));
        assert!(Condition::Below {
            stat: Stat::Skill,
            value: 8
        }
        .evaluate(&mut state, &mut dice));
        assert_eq!(dice.consumed(), 0);
    }

    #[test]
    fn test_parses_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            test: Condition,
        }
        let holder: Holder = toml::from_str(
            r#"test = { all = [ { below_ceiling = "stamina" }, { provisions_above = 1 } ] }"#,
        )
        .unwrap();
        assert_eq!(
            holder.test,
            Condition::All(vec![
                Condition::BelowCeiling(Stat::Stamina),
                Condition::ProvisionsAbove(1),
            ])
        );

        let holder: Holder = toml::from_str(r#"test = "luck""#).unwrap();
        assert_eq!(holder.test, Condition::Luck);
    }
}
