use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Artifact(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("input has {actual} values, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("classifier has not been fitted")]
    NotFitted,

    #[error("model produced a value outside [0, 1]: {0}")]
    InvalidProbability(f64),

    #[error(transparent)]
    Feature(#[from] medrisk_core::error::CoreError),
}
