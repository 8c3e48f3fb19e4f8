use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Transaction amount must be positive, got {0}")]
    InvalidAmount(f64),
    #[error("Goal target must be positive, got {0}")]
    InvalidTarget(f64),
    #[error("Goal not found: {0}")]
    UnknownGoal(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
