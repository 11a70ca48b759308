use std::sync::Arc;

use medrisk_core::models::report::RiskReport;
use medrisk_core::models::user::UserContext;
use medrisk_core::records::HealthRecordSet;
use medrisk_features::FeatureEngineer;
use medrisk_predictor::DiseaseRiskPredictor;
use tracing::{error, info};

use crate::engine::ScoringEngine;
use crate::error::AssessmentError;

/// Run the full assessment: features, probabilities, report.
///
/// A record set with no data in any category is rejected before anything
/// runs. Any later failure becomes [`AssessmentError::Pipeline`] and no
/// report is produced.
pub fn assess(
    records: &HealthRecordSet,
    engineer: &FeatureEngineer,
    predictor: &DiseaseRiskPredictor,
    engine: &ScoringEngine,
    user: &UserContext,
) -> Result<RiskReport, AssessmentError> {
    if records.is_empty() {
        info!(user_id = %user.id, "no health data, skipping assessment");
        return Err(AssessmentError::InsufficientData);
    }

    let features = engineer.engineer(records);
    let missing = features.missing_keys();
    if !missing.is_empty() {
        error!(user_id = %user.id, ?missing, "feature vector is incomplete");
        return Err(AssessmentError::Pipeline(format!(
            "feature vector is missing {} schema keys",
            missing.len()
        )));
    }

    let scores = predictor.predict(&features);

    engine
        .generate_report(&scores, &features, user)
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "report generation failed");
            AssessmentError::Pipeline(e.to_string())
        })
}

/// The three pipeline stages, shared across requests.
#[derive(Clone)]
pub struct RiskAssessor {
    pub engineer: Arc<FeatureEngineer>,
    pub predictor: Arc<DiseaseRiskPredictor>,
    pub engine: Arc<ScoringEngine>,
}

impl RiskAssessor {
    pub fn new(predictor: DiseaseRiskPredictor, engine: ScoringEngine) -> Self {
        RiskAssessor {
            engineer: Arc::new(FeatureEngineer::new()),
            predictor: Arc::new(predictor),
            engine: Arc::new(engine),
        }
    }

    pub fn assess(
        &self,
        records: &HealthRecordSet,
        user: &UserContext,
    ) -> Result<RiskReport, AssessmentError> {
        assess(records, &self.engineer, &self.predictor, &self.engine, user)
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(DiseaseRiskPredictor::rule_based(), ScoringEngine::default())
    }
}
