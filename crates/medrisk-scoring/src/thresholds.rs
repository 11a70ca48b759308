use std::collections::BTreeMap;
use std::path::Path;

use medrisk_core::models::disease::Disease;
use medrisk_core::models::report::RiskLevel;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScoringError;

/// Probability cut points separating the four risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPoints {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl CutPoints {
    /// Used for any disease without configured cut points.
    pub const DEFAULT: CutPoints = CutPoints::new(0.3, 0.5, 0.7);

    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        CutPoints { low, medium, high }
    }

    /// Strict `<` at every cut point: a score equal to `low` is already medium,
    /// and a score equal to `high` is very high.
    pub fn level(&self, score: f64) -> RiskLevel {
        if score < self.low {
            RiskLevel::Low
        } else if score < self.medium {
            RiskLevel::Medium
        } else if score < self.high {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    fn check(&self, disease: &str) -> Result<(), ScoringError> {
        let ordered = self.low <= self.medium && self.medium <= self.high;
        let in_range = [self.low, self.medium, self.high]
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p));
        if !ordered || !in_range {
            return Err(ScoringError::InvalidThresholds {
                disease: disease.to_string(),
                reason: format!(
                    "expected 0 <= low <= medium <= high <= 1, got {}/{}/{}",
                    self.low, self.medium, self.high
                ),
            });
        }
        Ok(())
    }
}

impl Default for CutPoints {
    fn default() -> Self {
        CutPoints::DEFAULT
    }
}

/// Per-disease cut points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskThresholds(BTreeMap<String, CutPoints>);

impl Default for RiskThresholds {
    fn default() -> Self {
        let defaults = [
            (Disease::Diabetes, CutPoints::new(0.3, 0.5, 0.7)),
            (Disease::Hypertension, CutPoints::new(0.3, 0.5, 0.7)),
            (Disease::LiverDisease, CutPoints::new(0.25, 0.45, 0.65)),
            (Disease::CardiacRisk, CutPoints::new(0.35, 0.55, 0.75)),
            (Disease::MentalHealth, CutPoints::new(0.3, 0.5, 0.7)),
        ];
        RiskThresholds(
            defaults
                .into_iter()
                .map(|(d, c)| (d.as_str().to_string(), c))
                .collect(),
        )
    }
}

impl RiskThresholds {
    pub fn for_disease(&self, disease: &str) -> CutPoints {
        self.0.get(disease).copied().unwrap_or_default()
    }

    pub fn level(&self, disease: &str, score: f64) -> RiskLevel {
        self.for_disease(disease).level(score)
    }

    /// Replace the cut points for one disease.
    pub fn with(mut self, disease: &str, cut_points: CutPoints) -> Self {
        self.0.insert(disease.to_string(), cut_points);
        self
    }

    /// Defaults overlaid with the diseases listed in a JSON file shaped like
    /// `{"diabetes": {"low": 0.2, "medium": 0.4, "high": 0.6}}`.
    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let bytes = std::fs::read(path).map_err(|source| ScoringError::ThresholdsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: BTreeMap<String, CutPoints> = serde_json::from_slice(&bytes)?;

        let mut thresholds = RiskThresholds::default();
        for (disease, cut_points) in overrides {
            cut_points.check(&disease)?;
            thresholds.0.insert(disease, cut_points);
        }
        info!(path = %path.display(), diseases = thresholds.0.len(), "loaded risk thresholds");
        Ok(thresholds)
    }
}
