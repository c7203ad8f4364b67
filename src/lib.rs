//! Gamebook Sim - Monte Carlo survival odds for gamebook walkthroughs

pub mod character;
pub mod combat;
pub mod core;
pub mod scenario;
pub mod statistics;
