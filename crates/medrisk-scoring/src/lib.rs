//! medrisk-scoring
//!
//! Turns per-disease probabilities into a [`RiskReport`]: risk levels from
//! configurable cut points, explanations, recommendations, and prioritized
//! next steps. Also hosts the end-to-end assessment pipeline.
//!
//! [`RiskReport`]: medrisk_core::models::report::RiskReport

pub mod catalog;
pub mod engine;
pub mod error;
pub mod factors;
pub mod pipeline;
pub mod thresholds;

pub use engine::ScoringEngine;
pub use error::{AssessmentError, ScoringError};
pub use pipeline::{assess, RiskAssessor};
pub use thresholds::{CutPoints, RiskThresholds};
