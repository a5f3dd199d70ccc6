use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Model not found: {key}")]
    ModelNotFound { key: String },
    #[error("Duplicate model key: {key}")]
    DuplicateModel { key: String },
    #[error("Invalid workload: {0}")]
    InvalidWorkload(String),
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("Invalid rollout: {0}")]
    InvalidRollout(String),
    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;
