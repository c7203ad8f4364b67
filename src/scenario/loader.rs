//! Load scenario scripts from TOML
//!
//! The shipped walkthroughs are embedded at build time; any other script
//! can be loaded from disk. Every script is validated before it is handed
//! out, so a bad file fails before the first trial.

use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::scenario::script::Scenario;

/// Walkthroughs compiled into the binary, by short name
const BUILTIN_SCENARIOS: &[(&str, &str)] = &[
    ("warlock", include_str!("../../data/scenarios/warlock.toml")),
    ("crypt", include_str!("../../data/scenarios/crypt.toml")),
];

/// Names accepted by [`load_builtin`]
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_SCENARIOS.iter().map(|(name, _)| *name)
}

/// Parse and validate a scenario from TOML text
pub fn parse_scenario(content: &str) -> Result<Scenario> {
    let scenario: Scenario = toml::from_str(content)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load a scenario from a TOML file
pub fn load_scenario_file(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)?;
    parse_scenario(&content)
}

/// Load one of the embedded walkthroughs
pub fn load_builtin(name: &str) -> Result<Scenario> {
    let (_, content) = BUILTIN_SCENARIOS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .ok_or_else(|| SimError::UnknownScenario(name.to_string()))?;
    parse_scenario(content)
}

/// Resolve a `--scenario` argument: a built-in name, or else a file path
pub fn load_scenario(name_or_path: &str) -> Result<Scenario> {
    if builtin_names().any(|name| name == name_or_path) {
        return load_builtin(name_or_path);
    }

    let path = Path::new(name_or_path);
    if path.is_file() {
        tracing::info!("Loading scenario from {}", path.display());
        return load_scenario_file(path);
    }

    Err(SimError::UnknownScenario(format!(
        "{} (built-ins: {})",
        name_or_path,
        builtin_names().collect::<Vec<_>>().join(", ")
    )))
}
