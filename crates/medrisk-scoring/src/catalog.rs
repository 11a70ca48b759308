//! Baseline recommendations per disease and risk level.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use medrisk_core::models::report::RiskLevel;

struct TierRecommendations {
    low: &'static [&'static str],
    medium: &'static [&'static str],
    high: &'static [&'static str],
    very_high: &'static [&'static str],
}

impl TierRecommendations {
    fn for_level(&self, level: RiskLevel) -> &'static [&'static str] {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::VeryHigh => self.very_high,
        }
    }
}

static CATALOG: LazyLock<BTreeMap<&'static str, TierRecommendations>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "diabetes",
            TierRecommendations {
                low: &[
                    "Maintain healthy weight through balanced diet",
                    "Exercise regularly (150 minutes per week)",
                    "Monitor blood sugar annually",
                ],
                medium: &[
                    "Consult with healthcare provider for glucose screening",
                    "Adopt low-glycemic diet",
                    "Increase physical activity",
                    "Monitor blood sugar every 6 months",
                ],
                high: &[
                    "Immediate consultation with endocrinologist",
                    "Comprehensive glucose tolerance testing",
                    "Create diabetes prevention plan",
                    "Monitor blood sugar monthly",
                ],
                very_high: &[
                    "Urgent medical evaluation required",
                    "Immediate lifestyle intervention",
                    "Consider medication consultation",
                    "Weekly glucose monitoring",
                ],
            },
        ),
        (
            "hypertension",
            TierRecommendations {
                low: &[
                    "Maintain healthy blood pressure through diet",
                    "Regular cardiovascular exercise",
                    "Limit sodium intake",
                ],
                medium: &[
                    "Monitor blood pressure weekly",
                    "Reduce sodium to <2300mg/day",
                    "Consult with healthcare provider",
                    "Manage stress through relaxation techniques",
                ],
                high: &[
                    "Immediate medical consultation",
                    "Daily blood pressure monitoring",
                    "Strict DASH diet adherence",
                    "Medication evaluation",
                ],
                very_high: &[
                    "Emergency medical evaluation",
                    "Immediate blood pressure management",
                    "Comprehensive cardiovascular assessment",
                    "Multiple daily BP measurements",
                ],
            },
        ),
        (
            "liver_disease",
            TierRecommendations {
                low: &[
                    "Maintain liver health through balanced diet",
                    "Limit alcohol consumption",
                    "Annual liver function tests",
                ],
                medium: &[
                    "Consult hepatologist for evaluation",
                    "Reduce or eliminate alcohol",
                    "Liver function tests every 6 months",
                    "Consider hepatitis screening",
                ],
                high: &[
                    "Immediate hepatology consultation",
                    "Comprehensive liver assessment",
                    "Abstain from alcohol",
                    "Quarterly liver monitoring",
                ],
                very_high: &[
                    "Urgent hepatology evaluation",
                    "Complete abstinence from alcohol",
                    "Imaging studies (ultrasound/MRI)",
                    "Monthly liver function monitoring",
                ],
            },
        ),
        (
            "cardiac_risk",
            TierRecommendations {
                low: &[
                    "Maintain heart-healthy diet",
                    "Regular aerobic exercise",
                    "Annual cardiovascular check-up",
                ],
                medium: &[
                    "Cardiology consultation",
                    "Lipid profile every 6 months",
                    "Increase cardiovascular exercise",
                    "Consider cardiac calcium scoring",
                ],
                high: &[
                    "Immediate cardiology evaluation",
                    "Comprehensive cardiac workup",
                    "Aggressive risk factor management",
                    "Consider stress test",
                ],
                very_high: &[
                    "Emergency cardiac assessment",
                    "Immediate intervention planning",
                    "Medication optimization",
                    "Close cardiac monitoring",
                ],
            },
        ),
        (
            "mental_health",
            TierRecommendations {
                low: &[
                    "Practice stress management techniques",
                    "Maintain social connections",
                    "Ensure adequate sleep",
                ],
                medium: &[
                    "Consider counseling or therapy",
                    "Develop coping strategies",
                    "Regular mental health check-ins",
                    "Improve work-life balance",
                ],
                high: &[
                    "Immediate mental health professional consultation",
                    "Comprehensive psychological assessment",
                    "Consider therapy or medication",
                    "Build strong support network",
                ],
                very_high: &[
                    "Urgent mental health intervention",
                    "Immediate psychiatric evaluation",
                    "Crisis support resources",
                    "Intensive treatment consideration",
                ],
            },
        ),
    ])
});

/// Tier recommendations for `disease`; empty for diseases not in the catalog.
pub fn base_recommendations(disease: &str, level: RiskLevel) -> &'static [&'static str] {
    match CATALOG.get(disease) {
        Some(tiers) => tiers.for_level(level),
        None => &[],
    }
}
