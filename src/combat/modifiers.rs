//! Per-encounter combat configuration
//!
//! Modifiers live for one fight. Tactics are the walkthrough's choices about
//! when luck is worth spending; they are scenario data, not engine rules.

use serde::{Deserialize, Serialize};

/// When the hero spends or risks luck in combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tactics {
    /// Luck must be at least this to gamble on a wounding blow
    pub min_luck_to_spend: i32,

    /// Only gamble while the opponent has more stamina than this; at or
    /// below it a plain hit is just as good.
    pub spend_above_opponent_stamina: i32,

    /// On a lost round at or below this stamina, a luck test is forced to
    /// soften the blow whatever the current luck.
    pub desperate_at_stamina: i32,
}

impl Default for Tactics {
    fn default() -> Self {
        Self {
            min_luck_to_spend: 6,
            spend_above_opponent_stamina: 2,
            desperate_at_stamina: 2,
        }
    }
}

/// Opponent-specific mechanics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRule {
    /// Hero attack strength is reduced on the opening round only
    FirstRoundPenalty(i32),
    /// Hero loses this much skill each round lost
    SkillDrain(i32),
    /// Losing this many rounds in a row is fatal
    DefeatAfterLosses(u32),
    /// Winning this many rounds in a row slays the opponent outright
    VictoryAfterWins(u32),
    /// After each round the opponent survives, a d6 showing this value is
    /// a fatal wound
    InstantDeath(i32),
    /// Companions with these skills each fight a side exchange every round,
    /// wounding the opponent for 2 when they win it
    Allies(Vec<i32>),
}

/// Configuration for a single combat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterModifiers {
    /// How many times luck may be gambled for extra damage
    pub luck_spends: u32,
    /// A shield turns a 2-point wound into 1 on a d6 roll of 6
    pub shield: bool,
    pub rules: Vec<SpecialRule>,
    /// Overrides the scenario's tactics for this fight
    pub tactics: Option<Tactics>,
}

impl EncounterModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_luck_spends(mut self, spends: u32) -> Self {
        self.luck_spends = spends;
        self
    }

    pub fn with_shield(mut self) -> Self {
        self.shield = true;
        self
    }

    pub fn with_rule(mut self, rule: SpecialRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub(crate) fn first_round_penalty(&self) -> i32 {
        self.rules
            .iter()
            .map(|r| match r {
                SpecialRule::FirstRoundPenalty(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn skill_drain(&self) -> i32 {
        self.rules
            .iter()
            .map(|r| match r {
                SpecialRule::SkillDrain(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn defeat_after_losses(&self) -> Option<u32> {
        self.rules.iter().find_map(|r| match r {
            SpecialRule::DefeatAfterLosses(n) => Some(*n),
            _ => None,
        })
    }

    pub(crate) fn victory_after_wins(&self) -> Option<u32> {
        self.rules.iter().find_map(|r| match r {
            SpecialRule::VictoryAfterWins(n) => Some(*n),
            _ => None,
        })
    }

    pub(crate) fn instant_death_roll(&self) -> Option<i32> {
        self.rules.iter().find_map(|r| match r {
            SpecialRule::InstantDeath(n) => Some(*n),
            _ => None,
        })
    }

    pub(crate) fn allies(&self) -> &[i32] {
        self.rules
            .iter()
            .find_map(|r| match r {
                SpecialRule::Allies(skills) => Some(skills.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tactics_match_walkthrough_thresholds() {
        let tactics = Tactics::default();
        assert_eq!(tactics.min_luck_to_spend, 6);
        assert_eq!(tactics.spend_above_opponent_stamina, 2);
        assert_eq!(tactics.desperate_at_stamina, 2);
    }

    #[test]
    fn test_rule_lookups() {
        let modifiers = EncounterModifiers::new()
            .with_rule(SpecialRule::SkillDrain(1))
            .with_rule(SpecialRule::Allies(vec![10, 9]))
            .with_rule(SpecialRule::DefeatAfterLosses(2));

        assert_eq!(modifiers.skill_drain(), 1);
        assert_eq!(modifiers.allies(), &[10, 9]);
        assert_eq!(modifiers.defeat_after_losses(), Some(2));
        assert_eq!(modifiers.victory_after_wins(), None);
        assert_eq!(modifiers.first_round_penalty(), 0);
    }

    #[test]
    fn test_modifiers_parse_from_toml() {
        let modifiers: EncounterModifiers = toml::from_str(
            r#"
            luck_spends = 3
            rules = [ { instant_death = 1 }, { allies = [10, 9] } ]
            "#,
        )
        .expect("modifiers should parse");

        assert_eq!(modifiers.luck_spends, 3);
        assert!(!modifiers.shield);
        assert_eq!(modifiers.instant_death_roll(), Some(1));
        assert_eq!(modifiers.allies(), &[10, 9]);
    }
}
