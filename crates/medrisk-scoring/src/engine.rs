use std::collections::BTreeMap;

use jiff::Timestamp;
use medrisk_core::features::{name, FeatureVector};
use medrisk_core::models::disease::{display_name, RiskScores};
use medrisk_core::models::report::{
    Confidence, DetailedRecommendations, DiseaseAssessment, PriorityAction, ReviewInterval,
    RiskLevel, RiskReport, Urgency,
};
use medrisk_core::models::user::UserContext;
use medrisk_features::stats::round2;
use tracing::info;

use crate::catalog::base_recommendations;
use crate::error::ScoringError;
use crate::factors::{contributing_factors, key_risk_factors, personalized_recommendations};
use crate::thresholds::RiskThresholds;

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const MAX_PRIORITY_ACTIONS: usize = 5;

/// Features whose presence backs the confidence of every assessment.
const CONFIDENCE_FEATURES: [&str; 5] = [
    name::GLUCOSE_LATEST,
    name::BP_SYSTOLIC_LATEST,
    name::AVG_SLEEP_HOURS,
    name::AVG_EXERCISE_MINUTES,
    name::AVG_STRESS_LEVEL,
];

/// Representative features per category for the completeness summary.
const COMPLETENESS: [(&str, &[&str]); 4] = [
    (
        "lab_data",
        &[name::GLUCOSE_LATEST, name::BP_SYSTOLIC_LATEST, name::CHOLESTEROL_LATEST],
    ),
    (
        "lifestyle_data",
        &[name::AVG_SLEEP_HOURS, name::AVG_EXERCISE_MINUTES, name::AVG_STEPS],
    ),
    ("mental_health", &[name::AVG_STRESS_LEVEL, name::AVG_MOOD_SCORE]),
    (
        "family_history",
        &[name::HAS_FAMILY_DIABETES, name::HAS_FAMILY_HYPERTENSION],
    ),
];

/// Builds risk reports. Holds only immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    thresholds: RiskThresholds,
}

impl ScoringEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        ScoringEngine { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn risk_level(&self, disease: &str, score: f64) -> RiskLevel {
        self.thresholds.level(disease, score)
    }

    /// Build a report dated now.
    pub fn generate_report(
        &self,
        scores: &RiskScores,
        features: &FeatureVector,
        user: &UserContext,
    ) -> Result<RiskReport, ScoringError> {
        self.generate_report_at(scores, features, user, Timestamp::now())
    }

    /// Build a report with an explicit date. Everything except `report_date`
    /// is a pure function of the inputs.
    pub fn generate_report_at(
        &self,
        scores: &RiskScores,
        features: &FeatureVector,
        user: &UserContext,
        report_date: Timestamp,
    ) -> Result<RiskReport, ScoringError> {
        if scores.is_empty() {
            return Err(ScoringError::NoScores);
        }
        for (disease, score) in scores {
            if !score.is_finite() || !(0.0..=1.0).contains(score) {
                return Err(ScoringError::InvalidProbability {
                    disease: disease.clone(),
                    value: *score,
                });
            }
        }

        let confidence = confidence(features);
        let risk_assessments: BTreeMap<String, DiseaseAssessment> = scores
            .iter()
            .map(|(disease, score)| {
                let level = self.risk_level(disease, *score);
                let assessment = DiseaseAssessment {
                    disease: disease.clone(),
                    risk_score: round2(score * 100.0),
                    risk_level: level,
                    confidence,
                    contributing_factors: contributing_factors(disease, features),
                    recommendations: recommendations(disease, level, features),
                };
                (disease.clone(), assessment)
            })
            .collect();

        let mean = scores.values().sum::<f64>() / scores.len() as f64;
        let overall_risk_score = round2(mean * 100.0);

        let report = RiskReport {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            report_date,
            overall_risk_score,
            priority_actions: prioritize_actions(&risk_assessments),
            detailed_recommendations: detailed_recommendations(&risk_assessments, features),
            key_risk_factors: key_risk_factors(features),
            data_completeness: data_completeness(features),
            next_assessment_date: next_review(&risk_assessments),
            risk_assessments,
        };

        info!(
            user_id = %user.id,
            diseases = report.risk_assessments.len(),
            overall_risk_score,
            "risk report generated"
        );
        Ok(report)
    }
}

/// Share of key features with a positive value, bucketed.
pub fn confidence(features: &FeatureVector) -> Confidence {
    let available = CONFIDENCE_FEATURES
        .iter()
        .filter(|f| features.value(f) > 0.0)
        .count();
    let completeness = available as f64 / CONFIDENCE_FEATURES.len() as f64;

    if completeness < 0.5 {
        Confidence::Low
    } else if completeness < 0.8 {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

/// Tier recommendations then personalized ones, truncated to five.
pub fn recommendations(disease: &str, level: RiskLevel, features: &FeatureVector) -> Vec<String> {
    base_recommendations(disease, level)
        .iter()
        .copied()
        .chain(personalized_recommendations(disease, features))
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

/// Elevated diseases first, then medium ones while fewer than five actions
/// exist. Both groups by descending score; ties keep disease-name order.
pub fn prioritize_actions(assessments: &BTreeMap<String, DiseaseAssessment>) -> Vec<PriorityAction> {
    let mut ranked: Vec<&DiseaseAssessment> = assessments.values().collect();
    ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    let mut actions: Vec<PriorityAction> = ranked
        .iter()
        .filter(|a| a.risk_level.is_elevated())
        .map(|a| PriorityAction {
            disease: a.disease.clone(),
            risk_score: a.risk_score,
            action: format!(
                "Consult a healthcare provider for {} assessment",
                display_name(&a.disease)
            ),
            urgency: Urgency::High,
        })
        .collect();

    for a in ranked.iter().filter(|a| a.risk_level == RiskLevel::Medium) {
        if actions.len() >= MAX_PRIORITY_ACTIONS {
            break;
        }
        actions.push(PriorityAction {
            disease: a.disease.clone(),
            risk_score: a.risk_score,
            action: format!("Monitor {} risk factors", display_name(&a.disease)),
            urgency: Urgency::Medium,
        });
    }

    actions
}

pub fn detailed_recommendations(
    assessments: &BTreeMap<String, DiseaseAssessment>,
    f: &FeatureVector,
) -> DetailedRecommendations {
    let mut recs = DetailedRecommendations::default();

    if f.flag(name::SEDENTARY_LIFESTYLE) {
        recs.lifestyle
            .push("Engage in regular physical activity (150 min/week)".to_string());
    }
    if f.value(name::AVG_SLEEP_HOURS) < 7.0 {
        recs.lifestyle
            .push("Improve sleep duration to 7-9 hours per night".to_string());
    }
    if f.value(name::DIET_QUALITY_SCORE) < 3.0 {
        recs.lifestyle
            .push("Adopt a balanced, nutrient-rich diet".to_string());
    }

    for a in assessments.values().filter(|a| a.risk_level.is_elevated()) {
        recs.medical.push(format!(
            "Schedule consultation with healthcare provider for {}",
            display_name(&a.disease)
        ));
    }

    if f.value(name::GLUCOSE_LATEST) >= 100.0 {
        recs.monitoring
            .push("Monitor blood glucose levels monthly".to_string());
    }
    if f.value(name::BP_SYSTOLIC_LATEST) >= 130.0 {
        recs.monitoring.push("Track blood pressure daily".to_string());
    }

    recs.prevention
        .push("Maintain regular health check-ups".to_string());
    recs.prevention
        .push("Keep detailed health records and symptom diary".to_string());

    recs
}

/// Percentage of representative features with a positive value, per category.
pub fn data_completeness(f: &FeatureVector) -> BTreeMap<String, f64> {
    COMPLETENESS
        .iter()
        .map(|(category, features)| {
            let available = features.iter().filter(|n| f.value(n) > 0.0).count();
            let pct = round2(available as f64 / features.len() as f64 * 100.0);
            (category.to_string(), pct)
        })
        .collect()
}

/// Sooner follow-up for higher peak risk.
pub fn next_review(assessments: &BTreeMap<String, DiseaseAssessment>) -> ReviewInterval {
    let max_score = assessments
        .values()
        .map(|a| a.risk_score)
        .fold(0.0_f64, f64::max);

    if max_score >= 70.0 {
        ReviewInterval::OneMonth
    } else if max_score >= 50.0 {
        ReviewInterval::ThreeMonths
    } else {
        ReviewInterval::SixMonths
    }
}
