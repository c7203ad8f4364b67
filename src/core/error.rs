use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid trial count: {0} (must be at least 1)")]
    InvalidTrials(u64),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid dice expression '{0}'")]
    DiceExpression(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
