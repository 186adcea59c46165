//! Error types for the training driver.

use thiserror::Error;

/// Driver-level failures.
///
/// Failures inside a model, criterion or optimizer are not represented here;
/// they panic inside the collaborator and propagate to the caller untouched.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("invalid learning-rate schedule: {0}")]
    InvalidSchedule(String),

    #[error("validation set is empty; mean validation loss is undefined")]
    EmptyValidationSet,

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("stopped by interrupt before validation finished")]
    Interrupted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, TrainError>;
