use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("no risk scores to report")]
    NoScores,

    #[error("risk score for {disease} is not a probability: {value}")]
    InvalidProbability { disease: String, value: f64 },

    #[error("failed to read thresholds {path}: {source}")]
    ThresholdsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed thresholds: {0}")]
    ThresholdsFormat(#[from] serde_json::Error),

    #[error("invalid cut points for {disease}: {reason}")]
    InvalidThresholds { disease: String, reason: String },
}

/// Failure of a whole assessment request.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// No category holds any data. The user can fix this by adding records.
    #[error("no health data available for assessment")]
    InsufficientData,

    #[error("assessment pipeline failed: {0}")]
    Pipeline(String),
}

impl AssessmentError {
    /// Text safe to show an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssessmentError::InsufficientData => {
                "Insufficient data for risk assessment. Please add health data first."
            }
            AssessmentError::Pipeline(_) => "Failed to generate risk assessment",
        }
    }
}
