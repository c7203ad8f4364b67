//! The player character

pub mod state;

pub use state::{CharacterState, Stat, StartingStats};
