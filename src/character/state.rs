//! Character state: ceiling-clamped attributes, consumables and death
//!
//! Current SKILL, STAMINA and LUCK never exceed their ceilings (the initial
//! scores). Only the upper bound is clamped; stamina may go negative, at
//! which point a potion is drunk or the character dies.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieSource;

/// The three ceiling-clamped attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Skill,
    Stamina,
    Luck,
}

/// Starting scores and supplies for a fresh character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingStats {
    pub skill: i32,
    pub stamina: i32,
    pub luck: i32,
    #[serde(default)]
    pub provisions: i32,
    #[serde(default)]
    pub potions: i32,
}

impl StartingStats {
    pub fn new(skill: i32, stamina: i32, luck: i32) -> Self {
        Self {
            skill,
            stamina,
            luck,
            provisions: 0,
            potions: 0,
        }
    }

    pub fn with_provisions(mut self, provisions: i32) -> Self {
        self.provisions = provisions;
        self
    }

    pub fn with_potions(mut self, potions: i32) -> Self {
        self.potions = potions;
        self
    }
}

/// The hero of a single trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterState {
    initial_skill: i32,
    initial_stamina: i32,
    initial_luck: i32,
    skill: i32,
    stamina: i32,
    luck: i32,
    food: i32,
    potions: i32,
    died: bool,
}

impl CharacterState {
    pub fn new(start: &StartingStats) -> Self {
        Self {
            initial_skill: start.skill,
            initial_stamina: start.stamina,
            initial_luck: start.luck,
            skill: start.skill,
            stamina: start.stamina,
            luck: start.luck,
            food: start.provisions.max(0),
            potions: start.potions.max(0),
            died: false,
        }
    }

    pub fn current(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Skill => self.skill,
            Stat::Stamina => self.stamina,
            Stat::Luck => self.luck,
        }
    }

    pub fn ceiling(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Skill => self.initial_skill,
            Stat::Stamina => self.initial_stamina,
            Stat::Luck => self.initial_luck,
        }
    }

    pub fn skill(&self) -> i32 {
        self.skill
    }

    pub fn stamina(&self) -> i32 {
        self.stamina
    }

    pub fn luck(&self) -> i32 {
        self.luck
    }

    pub fn provisions(&self) -> i32 {
        self.food
    }

    pub fn potions(&self) -> i32 {
        self.potions
    }

    pub fn has_died(&self) -> bool {
        self.died
    }

    pub fn is_alive(&self) -> bool {
        !self.died
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Skill => &mut self.skill,
            Stat::Stamina => &mut self.stamina,
            Stat::Luck => &mut self.luck,
        }
    }

    /// Add `delta` to a stat, capping at its ceiling.
    ///
    /// This is the raw clamp: it never triggers potions or death, even for
    /// stamina. Use [`apply`](Self::apply) for scripted changes.
    pub fn adjust(&mut self, stat: Stat, delta: i32) {
        let ceiling = self.ceiling(stat);
        let slot = self.slot_mut(stat);
        *slot = (*slot + delta).min(ceiling);
    }

    /// Apply a scripted change to any stat; stamina goes through the
    /// potion/death rule.
    pub fn apply(&mut self, stat: Stat, delta: i32) {
        match stat {
            Stat::Stamina => self.apply_stamina_change(delta),
            _ => self.adjust(stat, delta),
        }
    }

    /// Change stamina, then drink a potion or die if it fell to zero or below
    pub fn apply_stamina_change(&mut self, delta: i32) {
        self.adjust(Stat::Stamina, delta);
        if self.stamina > 0 {
            return;
        }

        if self.potions > 0 {
            self.potions -= 1;
            self.stamina = self.initial_stamina;
            tracing::trace!(potions_left = self.potions, "potion drunk");
        } else {
            if !self.died {
                tracing::trace!(stamina = self.stamina, "died");
            }
            self.died = true;
        }
    }

    /// Permanently raise a stat's ceiling. The current value is untouched.
    pub fn raise_ceiling(&mut self, stat: Stat, amount: i32) {
        match stat {
            Stat::Skill => self.initial_skill += amount,
            Stat::Stamina => self.initial_stamina += amount,
            Stat::Luck => self.initial_luck += amount,
        }
    }

    /// A blow that takes all remaining stamina. A potion can still save the
    /// character.
    pub fn suffer_fatal_wound(&mut self) {
        self.apply_stamina_change(-self.stamina);
    }

    /// Eat one provision for `amount` stamina, if hurt and supplied
    pub fn eat(&mut self, amount: i32) {
        if self.stamina < self.initial_stamina && self.food > 0 {
            self.food -= 1;
            self.apply_stamina_change(amount);
        }
    }

    /// Rest between encounters, eating one provision per full 4 stamina
    /// missing
    pub fn rest_and_heal(&mut self) {
        let need = ((self.initial_stamina - self.stamina) / 4).clamp(0, self.food);
        self.apply_stamina_change(4 * need);
        self.food -= need;
    }

    /// Gain or lose provisions without eating them
    pub fn adjust_provisions(&mut self, delta: i32) {
        self.food = (self.food + delta).max(0);
    }

    pub fn set_provisions(&mut self, count: i32) {
        self.food = count.max(0);
    }

    /// Skill test: 2d6 at or under current skill
    pub fn test_skill(&self, dice: &mut impl DieSource) -> bool {
        dice.two_d6() <= self.skill
    }

    /// Stamina test: 2d6 at or under current stamina
    pub fn test_stamina(&self, dice: &mut impl DieSource) -> bool {
        dice.two_d6() <= self.stamina
    }

    /// Luck test: 2d6 at or under current luck. Spends one luck point
    /// whatever the result.
    pub fn test_luck(&mut self, dice: &mut impl DieSource) -> bool {
        let luck = self.luck;
        self.luck -= 1;
        dice.two_d6() <= luck
    }

    /// 2d6 at or under a stat, without any side effect
    pub fn roll_under(&self, stat: Stat, dice: &mut impl DieSource) -> bool {
        dice.two_d6() <= self.current(stat)
    }

    /// `skill/stamina/luck` for trace output
    pub fn summary(&self) -> String {
        format!("{}/{}/{}", self.skill, self.stamina, self.luck)
    }
}
