pub mod modifiers;
pub mod resolution;

pub use modifiers::{EncounterModifiers, SpecialRule, Tactics};
pub use resolution::{resolve_combat, CombatOutcome, CombatReport, Opponent, MAX_COMBAT_ROUNDS};
