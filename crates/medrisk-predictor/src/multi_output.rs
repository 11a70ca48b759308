//! Multi-output "future disease" model.
//!
//! One artifact scores several targets from a flat input of numeric and
//! categorical columns. Its levels use a five-tier severity scale that is
//! independent of the four-tier risk levels in assessment reports.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use ts_rs::TS;

use crate::artifact::Classifier;
use crate::error::PredictError;

/// Categorical value used when an input is missing.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SeverityTier {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityTier {
    pub fn from_probability(p: f64) -> Self {
        if p < 0.001 {
            SeverityTier::VeryLow
        } else if p < 0.01 {
            SeverityTier::Low
        } else if p < 0.05 {
            SeverityTier::Moderate
        } else if p < 0.20 {
            SeverityTier::High
        } else {
            SeverityTier::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetPrediction {
    pub probability: f64,
    pub level: SeverityTier,
}

/// One-hot encoding of categorical columns; `categories[i]` lists the known
/// values of the i-th categorical column in output order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Encode one value per column. Unknown values produce an all-zero block.
    pub fn transform(&self, values: &[String]) -> Result<Vec<f64>, PredictError> {
        if values.len() != self.categories.len() {
            return Err(PredictError::DimensionMismatch {
                expected: self.categories.len(),
                actual: values.len(),
            });
        }
        let mut encoded = Vec::with_capacity(self.width());
        for (known, value) in self.categories.iter().zip(values) {
            encoded.extend(known.iter().map(|k| if k == value { 1.0 } else { 0.0 }));
        }
        Ok(encoded)
    }
}

/// One binary estimator per target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiOutputClassifier {
    pub estimators: Vec<Classifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiOutputModel {
    #[serde(default)]
    pub encoder: Option<OneHotEncoder>,
    pub clf: MultiOutputClassifier,
    pub numeric_cols: Vec<String>,
    #[serde(default)]
    pub categorical_cols: Vec<String>,
    pub target_prob_cols: Vec<String>,
}

impl MultiOutputModel {
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let bytes = std::fs::read(path).map_err(|source| PredictError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: MultiOutputModel = serde_json::from_slice(&bytes)?;
        model.check()?;
        info!(
            path = %path.display(),
            targets = model.target_prob_cols.len(),
            "loaded multi-output model"
        );
        Ok(model)
    }

    fn check(&self) -> Result<(), PredictError> {
        if self.clf.estimators.len() != self.target_prob_cols.len() {
            return Err(PredictError::InvalidArtifact(format!(
                "{} estimators for {} targets",
                self.clf.estimators.len(),
                self.target_prob_cols.len()
            )));
        }
        if let Some(encoder) = &self.encoder {
            if encoder.categories.len() != self.categorical_cols.len() {
                return Err(PredictError::InvalidArtifact(format!(
                    "encoder has {} columns, model lists {} categorical columns",
                    encoder.categories.len(),
                    self.categorical_cols.len()
                )));
            }
        }
        Ok(())
    }

    /// Model input row: numeric columns, then the one-hot categorical block.
    pub fn encode(&self, input: &Map<String, Value>) -> Result<Vec<f64>, PredictError> {
        let mut row: Vec<f64> = self
            .numeric_cols
            .iter()
            .map(|col| numeric_input(input.get(col)))
            .collect();

        if let Some(encoder) = &self.encoder {
            let categories: Vec<String> = self
                .categorical_cols
                .iter()
                .map(|col| categorical_input(input.get(col)))
                .collect();
            row.extend(encoder.transform(&categories)?);
        }
        Ok(row)
    }

    /// Probability and severity tier per target.
    pub fn predict(
        &self,
        input: &Map<String, Value>,
    ) -> Result<BTreeMap<String, TargetPrediction>, PredictError> {
        self.check()?;
        let row = self.encode(input)?;

        self.target_prob_cols
            .iter()
            .zip(&self.clf.estimators)
            .map(|(target, estimator)| {
                let probability = estimator.predict_proba(&row)?;
                Ok((
                    target.clone(),
                    TargetPrediction {
                        probability,
                        level: SeverityTier::from_probability(probability),
                    },
                ))
            })
            .collect()
    }
}

/// Numbers pass through, numeric strings are parsed, anything else is 0.
fn numeric_input(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn categorical_input(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_CATEGORY.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
