//! Explanations derived directly from the feature vector.

use medrisk_core::features::{name, FeatureVector};
use medrisk_core::models::report::{KeyRiskFactor, RiskLevel};

/// Shown when no contributing factor applies.
pub const NO_SIGNIFICANT_FACTORS: &str = "No significant risk factors identified";

/// Keep the label of every check that holds, in order.
fn holding(checks: &[(bool, &'static str)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, label)| *label)
        .collect()
}

/// Human-readable reasons behind a disease's risk. Never empty.
pub fn contributing_factors(disease: &str, f: &FeatureVector) -> Vec<String> {
    let low_diet = f.value(name::DIET_QUALITY_SCORE) < 2.5;
    let drinking = f.value(name::AVG_ALCOHOL_UNITS) > 2.0;
    let stressed = f.value(name::AVG_STRESS_LEVEL) >= 7.0;
    let smoking = f.flag(name::SMOKING);

    let factors = match disease {
        "diabetes" => holding(&[
            (f.value(name::GLUCOSE_LATEST) >= 100.0, "Elevated glucose levels"),
            (f.value(name::HBA1C_LATEST) >= 5.7, "Elevated HbA1c"),
            (f.flag(name::HAS_FAMILY_DIABETES), "Family history of diabetes"),
            (f.flag(name::SEDENTARY_LIFESTYLE), "Sedentary lifestyle"),
            (low_diet, "Poor diet quality"),
        ]),
        "hypertension" => holding(&[
            (f.value(name::BP_SYSTOLIC_LATEST) >= 130.0, "Elevated blood pressure"),
            (f.flag(name::HAS_FAMILY_HYPERTENSION), "Family history of hypertension"),
            (stressed, "High stress levels"),
            (drinking, "Excessive alcohol consumption"),
            (smoking, "Smoking"),
        ]),
        "liver_disease" => holding(&[
            (
                f.value(name::ALT_LATEST) > 30.0 || f.value(name::AST_LATEST) > 30.0,
                "Elevated liver enzymes",
            ),
            (drinking, "Excessive alcohol consumption"),
            (low_diet, "Poor diet"),
        ]),
        "cardiac_risk" => holding(&[
            (f.value(name::CHOLESTEROL_LATEST) > 200.0, "Elevated cholesterol"),
            (f.value(name::BP_SYSTOLIC_LATEST) >= 130.0, "High blood pressure"),
            (smoking, "Smoking"),
            (f.flag(name::HAS_FAMILY_HEART_DISEASE), "Family history of heart disease"),
            (f.value(name::EXERCISE_FREQUENCY) < 0.3, "Insufficient exercise"),
        ]),
        "mental_health" => holding(&[
            (stressed, "Chronic high stress"),
            (f.value(name::AVG_MOOD_SCORE) <= 2.5, "Low mood"),
            (f.value(name::AVG_SLEEP_HOURS) < 6.0, "Sleep deprivation"),
            (f.value(name::SOCIAL_INTERACTION_SCORE) <= 1.0, "Social isolation"),
            (f.value(name::WORK_LIFE_BALANCE_SCORE) <= 2.0, "Poor work-life balance"),
        ]),
        _ => Vec::new(),
    };

    if factors.is_empty() {
        return vec![NO_SIGNIFICANT_FACTORS.to_string()];
    }
    factors.into_iter().map(str::to_string).collect()
}

/// Recommendations targeting the user's own risk factors.
pub fn personalized_recommendations(disease: &str, f: &FeatureVector) -> Vec<&'static str> {
    match disease {
        "diabetes" => holding(&[
            (
                f.flag(name::SEDENTARY_LIFESTYLE),
                "Increase physical activity to at least 150 minutes per week",
            ),
            (
                f.value(name::DIET_QUALITY_SCORE) < 2.5,
                "Consult a nutritionist for a diabetes-prevention diet plan",
            ),
        ]),
        "hypertension" => holding(&[
            (
                f.value(name::AVG_STRESS_LEVEL) >= 7.0,
                "Practice stress-reduction techniques like meditation or yoga",
            ),
            (
                f.value(name::AVG_ALCOHOL_UNITS) > 2.0,
                "Reduce alcohol consumption to recommended limits",
            ),
        ]),
        "mental_health" => holding(&[
            (
                f.value(name::AVG_SLEEP_HOURS) < 6.0,
                "Improve sleep hygiene and aim for 7-9 hours of sleep",
            ),
            (
                f.value(name::SOCIAL_INTERACTION_SCORE) <= 1.0,
                "Increase social connections and community engagement",
            ),
        ]),
        _ => Vec::new(),
    }
}

/// Cross-disease risk factors with severity and whether the user can change them.
pub fn key_risk_factors(f: &FeatureVector) -> Vec<KeyRiskFactor> {
    let candidates = [
        (
            f.flag(name::HAS_FAMILY_DIABETES) || f.flag(name::HAS_FAMILY_HYPERTENSION),
            "Genetic predisposition",
            RiskLevel::High,
            false,
        ),
        (
            f.flag(name::SEDENTARY_LIFESTYLE),
            "Sedentary lifestyle",
            RiskLevel::Medium,
            true,
        ),
        (f.flag(name::SMOKING), "Smoking", RiskLevel::VeryHigh, true),
        (
            f.value(name::AVG_STRESS_LEVEL) >= 7.0,
            "Chronic stress",
            RiskLevel::High,
            true,
        ),
    ];

    candidates
        .into_iter()
        .filter(|(holds, ..)| *holds)
        .map(|(_, factor, severity, modifiable)| KeyRiskFactor {
            factor: factor.to_string(),
            severity,
            modifiable,
        })
        .collect()
}
