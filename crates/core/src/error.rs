use thiserror::Error;

pub type WizardResult<T> = Result<T, WizardError>;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown audience: {0}")]
    UnknownAudience(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Campaign is not ready to launch: {0}")]
    NotReady(String),

    #[error("Campaign creation failed: {0}")]
    Launch(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
