use medrisk_core::features::FeatureVector;
use medrisk_core::models::disease::{Disease, RiskScores};
use tracing::info;

use crate::registry::ModelRegistry;
use crate::strategy::ScoringStrategy;

/// Scores the five configured diseases.
#[derive(Debug, Clone)]
pub struct DiseaseRiskPredictor {
    strategies: Vec<(Disease, ScoringStrategy)>,
}

impl DiseaseRiskPredictor {
    pub fn new(registry: &ModelRegistry) -> Self {
        let strategies: Vec<(Disease, ScoringStrategy)> = Disease::ALL
            .into_iter()
            .map(|disease| (disease, ScoringStrategy::select(disease, registry.get(disease))))
            .collect();

        let trained = strategies.iter().filter(|(_, s)| s.is_trained()).count();
        info!(trained, rule_based = strategies.len() - trained, "risk predictor ready");

        DiseaseRiskPredictor { strategies }
    }

    /// A predictor that uses clinical rules for every disease.
    pub fn rule_based() -> Self {
        Self::new(&ModelRegistry::empty())
    }

    pub fn strategy(&self, disease: Disease) -> Option<&ScoringStrategy> {
        self.strategies
            .iter()
            .find(|(d, _)| *d == disease)
            .map(|(_, s)| s)
    }

    /// Disease → probability in `[0, 1]` for every configured disease.
    pub fn predict(&self, features: &FeatureVector) -> RiskScores {
        self.strategies
            .iter()
            .map(|(disease, strategy)| {
                (
                    disease.as_str().to_string(),
                    strategy.probability(*disease, features),
                )
            })
            .collect()
    }
}

impl Default for DiseaseRiskPredictor {
    fn default() -> Self {
        Self::rule_based()
    }
}
