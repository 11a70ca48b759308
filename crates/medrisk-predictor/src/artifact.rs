//! JSON model artifacts: a feature scaler plus a binary classifier.
//!
//! Artifacts are exported from the training environment as plain JSON so
//! the service never deserializes executable objects.

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// A per-disease model: inputs, scaler and classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names in model input order. `None` means the full schema order.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub scaler: StandardScaler,
    pub classifier: Classifier,
}

/// `(x − mean) / scale`, column by column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, inputs: &[f64]) -> Result<Vec<f64>, PredictError> {
        if self.mean.len() != inputs.len() || self.scale.len() != inputs.len() {
            return Err(PredictError::DimensionMismatch {
                expected: self.mean.len(),
                actual: inputs.len(),
            });
        }
        Ok(inputs
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant training columns are exported with scale 0.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Logistic(LogisticRegression),
    TreeEnsemble(TreeEnsemble),
}

impl Classifier {
    /// A classifier is usable once training recorded its class labels.
    pub fn is_fitted(&self) -> bool {
        match self {
            Classifier::Logistic(m) => !m.classes.is_empty(),
            Classifier::TreeEnsemble(m) => !m.classes.is_empty(),
        }
    }

    /// Probability of the positive class for one input row.
    pub fn predict_proba(&self, inputs: &[f64]) -> Result<f64, PredictError> {
        if !self.is_fitted() {
            return Err(PredictError::NotFitted);
        }
        let p = match self {
            Classifier::Logistic(m) => m.predict_proba(inputs)?,
            Classifier::TreeEnsemble(m) => m.predict_proba(inputs)?,
        };
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PredictError::InvalidProbability(p));
        }
        Ok(p)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default)]
    pub classes: Vec<serde_json::Value>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn predict_proba(&self, inputs: &[f64]) -> Result<f64, PredictError> {
        if self.coefficients.len() != inputs.len() {
            return Err(PredictError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: inputs.len(),
            });
        }
        let z: f64 = self.intercept
            + self
                .coefficients
                .iter()
                .zip(inputs)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

/// How tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: leaves hold positive-class probabilities, averaged.
    Mean,
    /// Gradient boosting: leaves hold log-odds contributions.
    LogitSum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub classes: Vec<serde_json::Value>,
    /// Number of input columns the trees were grown on.
    pub n_features: usize,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<DecisionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    fn predict_proba(&self, inputs: &[f64]) -> Result<f64, PredictError> {
        if inputs.len() != self.n_features {
            return Err(PredictError::DimensionMismatch {
                expected: self.n_features,
                actual: inputs.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(PredictError::InvalidArtifact("ensemble has no trees".into()));
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(inputs)?;
        }

        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::LogitSum => sigmoid(self.base_score + self.learning_rate * total),
        })
    }
}

/// A binary tree stored as a flat node array; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// `inputs[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl DecisionTree {
    fn evaluate(&self, inputs: &[f64]) -> Result<f64, PredictError> {
        let mut index = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                PredictError::InvalidArtifact(format!("tree node {index} does not exist"))
            })?;
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = inputs.get(*feature).ok_or_else(|| {
                        PredictError::InvalidArtifact(format!("split on missing input {feature}"))
                    })?;
                    index = if x <= threshold { *left } else { *right };
                }
            }
        }
        Err(PredictError::InvalidArtifact("tree does not terminate".into()))
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
