use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown record category: {0}")]
    UnknownCategory(String),

    #[error("unknown disease: {0}")]
    UnknownDisease(String),

    #[error("feature vector is missing schema key: {0}")]
    MissingFeature(String),

    #[error("feature '{name}' is not a finite number ({value})")]
    NonFiniteFeature { name: String, value: f64 },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
