//! medrisk-predictor
//!
//! Per-disease risk probabilities from an engineered feature vector. Each
//! disease is scored by a trained model artifact when one is available and
//! fitted, and by clinical rules otherwise. A separate multi-output model
//! serves the future-disease endpoint with its own severity scale.

pub mod artifact;
pub mod error;
pub mod multi_output;
pub mod predictor;
pub mod registry;
pub mod rules;
pub mod strategy;

pub use error::PredictError;
pub use predictor::DiseaseRiskPredictor;
pub use registry::ModelRegistry;
pub use strategy::ScoringStrategy;
