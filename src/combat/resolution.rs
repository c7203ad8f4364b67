//! Combat round resolution
//!
//! Each round both sides roll 2d6 plus skill. Ties do nothing; the loser of
//! a round takes 2 stamina, adjusted by shields, luck and opponent rules.
//! The fight ends when the opponent drops to 0 stamina or the hero dies.

use serde::{Deserialize, Serialize};

use crate::character::{CharacterState, Stat};
use crate::combat::modifiers::{EncounterModifiers, Tactics};
use crate::core::dice::DieSource;

/// Hard stop for fights that can never be decided, e.g. scripted dice that
/// only ever produce ties.
pub const MAX_COMBAT_ROUNDS: u32 = 10_000;

const BASE_DAMAGE: i32 = 2;
const LUCKY_BLOW: i32 = 4;
const UNLUCKY_BLOW: i32 = 1;
const ALLY_DAMAGE: i32 = 2;

/// The creature being fought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub skill: i32,
    pub stamina: i32,
}

impl Opponent {
    pub fn new(skill: i32, stamina: i32) -> Self {
        Self { skill, stamina }
    }
}

/// How a fight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    OpponentSlain,
    HeroDied,
    /// Round limit reached with both sides standing
    Stalemate,
}

/// Result of [`resolve_combat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    pub rounds: u32,
    /// Opponent stamina when the fight ended (may be negative)
    pub opponent_stamina: i32,
}

/// Fight `opponent` to the finish
///
/// # Arguments
/// * `hero` - mutated in place: stamina, skill and luck all change
/// * `opponent` - skill and starting stamina
/// * `modifiers` - shield, luck spends and special rules for this fight
/// * `tactics` - luck thresholds (the encounter's own override wins)
pub fn resolve_combat(
    hero: &mut CharacterState,
    opponent: Opponent,
    modifiers: &EncounterModifiers,
    tactics: &Tactics,
    dice: &mut impl DieSource,
) -> CombatReport {
    let tactics = modifiers.tactics.as_ref().unwrap_or(tactics);
    let mut opp_stamina = opponent.stamina;
    let mut luck_spends = modifiers.luck_spends;
    let mut losses_in_a_row = 0u32;
    let mut wins_in_a_row = 0u32;
    let mut round = 0u32;

    while opp_stamina > 0 && hero.is_alive() {
        if round >= MAX_COMBAT_ROUNDS {
            tracing::warn!(
                rounds = round,
                opponent_skill = opponent.skill,
                "combat round limit reached without a decision"
            );
            return CombatReport {
                outcome: CombatOutcome::Stalemate,
                rounds: round,
                opponent_stamina: opp_stamina,
            };
        }

        let mut hero_attack = hero.skill() + dice.two_d6();
        let opp_attack = opponent.skill + dice.two_d6();
        if round == 0 {
            hero_attack -= modifiers.first_round_penalty();
        }

        if hero_attack < opp_attack {
            losses_in_a_row += 1;
            wins_in_a_row = 0;

            let drain = modifiers.skill_drain();
            if drain != 0 {
                hero.adjust(Stat::Skill, -drain);
            }

            let mut damage = if modifiers.shield && dice.d6() == 6 {
                BASE_DAMAGE - 1
            } else {
                BASE_DAMAGE
            };
            if hero.stamina() <= tactics.desperate_at_stamina {
                if hero.test_luck(dice) {
                    damage -= 1;
                } else {
                    damage += 1;
                }
            }
            hero.apply_stamina_change(-damage);

            if modifiers.defeat_after_losses() == Some(losses_in_a_row) {
                hero.suffer_fatal_wound();
            }
        } else if hero_attack > opp_attack {
            wins_in_a_row += 1;
            losses_in_a_row = 0;

            if modifiers.victory_after_wins() == Some(wins_in_a_row) {
                opp_stamina = 0;
            }

            let gamble = opp_stamina > tactics.spend_above_opponent_stamina
                && luck_spends > 0
                && hero.luck() >= tactics.min_luck_to_spend;
            if gamble {
                opp_stamina -= if hero.test_luck(dice) {
                    LUCKY_BLOW
                } else {
                    UNLUCKY_BLOW
                };
                luck_spends -= 1;
            } else {
                opp_stamina -= BASE_DAMAGE;
            }
        }

        tracing::trace!(
            hero_attack,
            opp_attack,
            hero = %hero.summary(),
            opp_stamina,
            "combat round"
        );

        if opp_stamina > 0 && hero.is_alive() {
            if let Some(fatal_roll) = modifiers.instant_death_roll() {
                if dice.d6() == fatal_roll {
                    hero.suffer_fatal_wound();
                }
            }
        }

        for &ally_skill in modifiers.allies() {
            let ally_attack = ally_skill + dice.two_d6();
            let opp_defence = opponent.skill + dice.two_d6();
            if ally_attack > opp_defence {
                opp_stamina -= ALLY_DAMAGE;
            }
        }

        round += 1;
    }

    let outcome = if hero.has_died() {
        CombatOutcome::HeroDied
    } else {
        CombatOutcome::OpponentSlain
    };

    CombatReport {
        outcome,
        rounds: round,
        opponent_stamina: opp_stamina,
    }
}
