use std::sync::Arc;

use medrisk_core::features::{schema, FeatureVector};
use medrisk_core::models::disease::Disease;
use tracing::{error, warn};

use crate::artifact::ModelArtifact;
use crate::error::PredictError;
use crate::rules::rule_probability;

/// Neutral probability reported when even the clinical rules cannot run.
pub const RULE_FAILURE_PROBABILITY: f64 = 0.5;

/// Something that can turn a feature vector into one disease probability.
pub trait DiseaseScorer: Send + Sync {
    fn score(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

/// Scale the model inputs and run the trained classifier.
#[derive(Debug, Clone)]
pub struct TrainedScorer {
    artifact: Arc<ModelArtifact>,
}

impl TrainedScorer {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        TrainedScorer { artifact }
    }
}

impl DiseaseScorer for TrainedScorer {
    fn score(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let inputs = match &self.artifact.feature_names {
            Some(names) => features.select(names.iter().map(String::as_str))?,
            None => features.select(schema::all())?,
        };
        let scaled = self.artifact.scaler.transform(&inputs)?;
        self.artifact.classifier.predict_proba(&scaled)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleScorer {
    disease: Disease,
}

impl RuleScorer {
    pub fn new(disease: Disease) -> Self {
        RuleScorer { disease }
    }

    /// Rule probability, or [`RULE_FAILURE_PROBABILITY`] if the rule cannot run.
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        match self.score(features) {
            Ok(p) => p,
            Err(e) => {
                error!(disease = %self.disease, error = %e, "rule-based scoring failed");
                RULE_FAILURE_PROBABILITY
            }
        }
    }
}

impl DiseaseScorer for RuleScorer {
    fn score(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        rule_probability(self.disease, features)
    }
}

/// How one disease is scored, fixed when the predictor is built.
#[derive(Debug, Clone)]
pub enum ScoringStrategy {
    Trained(TrainedScorer),
    RuleBased(RuleScorer),
}

impl ScoringStrategy {
    /// Trained when `artifact` holds a fitted classifier, rules otherwise.
    pub fn select(disease: Disease, artifact: Option<Arc<ModelArtifact>>) -> Self {
        match artifact {
            Some(a) if a.classifier.is_fitted() => ScoringStrategy::Trained(TrainedScorer::new(a)),
            Some(_) => {
                warn!(disease = %disease, "model artifact is not fitted, using clinical rules");
                ScoringStrategy::RuleBased(RuleScorer::new(disease))
            }
            None => ScoringStrategy::RuleBased(RuleScorer::new(disease)),
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, ScoringStrategy::Trained(_))
    }

    /// Probability for `disease`. Never fails: a trained-model error falls
    /// back to the rules for this disease only.
    pub fn probability(&self, disease: Disease, features: &FeatureVector) -> f64 {
        match self {
            ScoringStrategy::Trained(model) => match model.score(features) {
                Ok(p) => p,
                Err(e) => {
                    warn!(disease = %disease, error = %e, "trained model failed, using clinical rules");
                    RuleScorer::new(disease).probability(features)
                }
            },
            ScoringStrategy::RuleBased(rules) => rules.probability(features),
        }
    }
}
