use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal severity bucket for one disease. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    /// High and very high both call for a provider consultation.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::VeryHigh)
    }
}

/// How much of the key input data backed an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    High,
    Medium,
}

/// Assessment of one disease within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiseaseAssessment {
    pub disease: String,
    /// Probability as a percentage, rounded to two decimals.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: Confidence,
    /// Never empty.
    pub contributing_factors: Vec<String>,
    /// At most five entries.
    pub recommendations: Vec<String>,
}

impl DiseaseAssessment {
    /// The underlying probability in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.risk_score / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriorityAction {
    pub disease: String,
    pub risk_score: f64,
    pub action: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetailedRecommendations {
    pub lifestyle: Vec<String>,
    pub medical: Vec<String>,
    pub monitoring: Vec<String>,
    pub prevention: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeyRiskFactor {
    pub factor: String,
    pub severity: RiskLevel,
    pub modifiable: bool,
}

/// When the user should be assessed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReviewInterval {
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[serde(rename = "6 months")]
    SixMonths,
}

impl ReviewInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewInterval::OneMonth => "1 month",
            ReviewInterval::ThreeMonths => "3 months",
            ReviewInterval::SixMonths => "6 months",
        }
    }
}

/// The full multi-disease risk report. Field names are the wire contract
/// consumed by storage, export, and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskReport {
    pub user_id: String,
    pub user_name: String,
    pub report_date: jiff::Timestamp,
    pub risk_assessments: BTreeMap<String, DiseaseAssessment>,
    pub overall_risk_score: f64,
    pub priority_actions: Vec<PriorityAction>,
    pub detailed_recommendations: DetailedRecommendations,
    pub key_risk_factors: Vec<KeyRiskFactor>,
    /// Category → percentage of representative features present.
    pub data_completeness: BTreeMap<String, f64>,
    pub next_assessment_date: ReviewInterval,
}
