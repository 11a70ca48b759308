//! The fixed feature schema and the [`FeatureVector`] that carries it.
//!
//! Every vector produced by the feature engineer holds exactly the keys in
//! [`schema::all`]. Flags are stored as `0.0` / `1.0`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Feature names, grouped by the record category that produces them.
pub mod name {
    // Lab
    pub const GLUCOSE_LATEST: &str = "glucose_latest";
    pub const HBA1C_LATEST: &str = "hba1c_latest";
    pub const CHOLESTEROL_LATEST: &str = "cholesterol_latest";
    pub const HDL_LATEST: &str = "hdl_latest";
    pub const LDL_LATEST: &str = "ldl_latest";
    pub const TRIGLYCERIDES_LATEST: &str = "triglycerides_latest";
    pub const BP_SYSTOLIC_LATEST: &str = "bp_systolic_latest";
    pub const BP_DIASTOLIC_LATEST: &str = "bp_diastolic_latest";
    pub const HEART_RATE_LATEST: &str = "heart_rate_latest";
    pub const ALT_LATEST: &str = "alt_latest";
    pub const AST_LATEST: &str = "ast_latest";
    pub const CREATININE_LATEST: &str = "creatinine_latest";
    pub const BUN_LATEST: &str = "bun_latest";
    pub const GLUCOSE_TREND: &str = "glucose_trend";
    pub const HBA1C_TREND: &str = "hba1c_trend";
    pub const BP_SYSTOLIC_TREND: &str = "bp_systolic_trend";
    pub const CHOLESTEROL_TREND: &str = "cholesterol_trend";
    pub const GLUCOSE_VARIABILITY: &str = "glucose_variability";
    pub const BP_VARIABILITY: &str = "bp_variability";
    pub const CHOLESTEROL_HDL_RATIO: &str = "cholesterol_hdl_ratio";
    pub const PULSE_PRESSURE: &str = "pulse_pressure";
    pub const PREDIABETES_FLAG: &str = "prediabetes_flag";
    pub const PREHYPERTENSION_FLAG: &str = "prehypertension_flag";

    // Lifestyle
    pub const AVG_SLEEP_HOURS: &str = "avg_sleep_hours";
    pub const SLEEP_CONSISTENCY: &str = "sleep_consistency";
    pub const POOR_SLEEP_DAYS: &str = "poor_sleep_days";
    pub const SLEEP_QUALITY_SCORE: &str = "sleep_quality_score";
    pub const AVG_EXERCISE_MINUTES: &str = "avg_exercise_minutes";
    pub const EXERCISE_FREQUENCY: &str = "exercise_frequency";
    pub const AVG_STEPS: &str = "avg_steps";
    pub const AVG_WATER_INTAKE: &str = "avg_water_intake";
    pub const DEHYDRATION_RISK: &str = "dehydration_risk";
    pub const AVG_ALCOHOL_UNITS: &str = "avg_alcohol_units";
    pub const SMOKING: &str = "smoking";
    pub const DIET_QUALITY_SCORE: &str = "diet_quality_score";
    pub const MEAL_REGULARITY: &str = "meal_regularity";
    pub const SEDENTARY_LIFESTYLE: &str = "sedentary_lifestyle";

    // Mental health
    pub const AVG_STRESS_LEVEL: &str = "avg_stress_level";
    pub const AVG_ANXIETY_LEVEL: &str = "avg_anxiety_level";
    pub const HIGH_STRESS_FREQUENCY: &str = "high_stress_frequency";
    pub const AVG_MOOD_SCORE: &str = "avg_mood_score";
    pub const LOW_MOOD_FREQUENCY: &str = "low_mood_frequency";
    pub const SOCIAL_INTERACTION_SCORE: &str = "social_interaction_score";
    pub const WORK_LIFE_BALANCE_SCORE: &str = "work_life_balance_score";
    pub const CHRONIC_STRESS_FLAG: &str = "chronic_stress_flag";
    pub const DEPRESSION_RISK_FLAG: &str = "depression_risk_flag";

    // Family history
    pub const FAMILY_DIABETES: &str = "family_diabetes";
    pub const FAMILY_HYPERTENSION: &str = "family_hypertension";
    pub const FAMILY_HEART_DISEASE: &str = "family_heart_disease";
    pub const FAMILY_LIVER_DISEASE: &str = "family_liver_disease";
    pub const FAMILY_MENTAL_HEALTH: &str = "family_mental_health";
    pub const HAS_FAMILY_DIABETES: &str = "has_family_diabetes";
    pub const HAS_FAMILY_HYPERTENSION: &str = "has_family_hypertension";
    pub const HAS_FAMILY_HEART_DISEASE: &str = "has_family_heart_disease";
    pub const HAS_FAMILY_LIVER_DISEASE: &str = "has_family_liver_disease";
    pub const HAS_FAMILY_MENTAL_HEALTH: &str = "has_family_mental_health";
    pub const GENETIC_RISK_SCORE: &str = "genetic_risk_score";
}

/// Schema membership per category, in canonical order.
pub mod schema {
    use super::name::*;

    pub const LAB: &[&str] = &[
        GLUCOSE_LATEST,
        HBA1C_LATEST,
        CHOLESTEROL_LATEST,
        HDL_LATEST,
        LDL_LATEST,
        TRIGLYCERIDES_LATEST,
        BP_SYSTOLIC_LATEST,
        BP_DIASTOLIC_LATEST,
        HEART_RATE_LATEST,
        ALT_LATEST,
        AST_LATEST,
        CREATININE_LATEST,
        BUN_LATEST,
        GLUCOSE_TREND,
        HBA1C_TREND,
        BP_SYSTOLIC_TREND,
        CHOLESTEROL_TREND,
        GLUCOSE_VARIABILITY,
        BP_VARIABILITY,
        CHOLESTEROL_HDL_RATIO,
        PULSE_PRESSURE,
        PREDIABETES_FLAG,
        PREHYPERTENSION_FLAG,
    ];

    pub const LIFESTYLE: &[&str] = &[
        AVG_SLEEP_HOURS,
        SLEEP_CONSISTENCY,
        POOR_SLEEP_DAYS,
        SLEEP_QUALITY_SCORE,
        AVG_EXERCISE_MINUTES,
        EXERCISE_FREQUENCY,
        AVG_STEPS,
        AVG_WATER_INTAKE,
        DEHYDRATION_RISK,
        AVG_ALCOHOL_UNITS,
        SMOKING,
        DIET_QUALITY_SCORE,
        MEAL_REGULARITY,
        SEDENTARY_LIFESTYLE,
    ];

    pub const MENTAL_HEALTH: &[&str] = &[
        AVG_STRESS_LEVEL,
        AVG_ANXIETY_LEVEL,
        HIGH_STRESS_FREQUENCY,
        AVG_MOOD_SCORE,
        LOW_MOOD_FREQUENCY,
        SOCIAL_INTERACTION_SCORE,
        WORK_LIFE_BALANCE_SCORE,
        CHRONIC_STRESS_FLAG,
        DEPRESSION_RISK_FLAG,
    ];

    pub const FAMILY_HISTORY: &[&str] = &[
        FAMILY_DIABETES,
        FAMILY_HYPERTENSION,
        FAMILY_HEART_DISEASE,
        FAMILY_LIVER_DISEASE,
        FAMILY_MENTAL_HEALTH,
        HAS_FAMILY_DIABETES,
        HAS_FAMILY_HYPERTENSION,
        HAS_FAMILY_HEART_DISEASE,
        HAS_FAMILY_LIVER_DISEASE,
        HAS_FAMILY_MENTAL_HEALTH,
        GENETIC_RISK_SCORE,
    ];

    /// Every feature name in canonical order. Model inputs follow this order.
    pub fn all() -> impl Iterator<Item = &'static str> {
        LAB.iter()
            .chain(LIFESTYLE)
            .chain(MENTAL_HEALTH)
            .chain(FAMILY_HISTORY)
            .copied()
    }

    pub fn len() -> usize {
        LAB.len() + LIFESTYLE.len() + MENTAL_HEALTH.len() + FAMILY_HISTORY.len()
    }
}

/// Encode a boolean as a 0/1 feature value.
pub fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// A named numeric summary of a user's health history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), value);
    }

    /// Merge a category sub-vector into this one.
    pub fn merge(&mut self, part: FeatureVector) {
        self.0.extend(part.0);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Value of `name`, or `0.0` when absent.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// True when the 0/1 flag `name` is set.
    pub fn flag(&self, name: &str) -> bool {
        self.value(name) == 1.0
    }

    /// Value of `name`, failing when the key is absent or not finite.
    pub fn require(&self, name: &str) -> Result<f64, CoreError> {
        let value = self
            .get(name)
            .ok_or_else(|| CoreError::MissingFeature(name.to_string()))?;
        if !value.is_finite() {
            return Err(CoreError::NonFiniteFeature {
                name: name.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// Values for `names`, in the given order.
    pub fn select<'a, I>(&self, names: I) -> Result<Vec<f64>, CoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().map(|n| self.require(n)).collect()
    }

    /// Schema keys this vector does not carry.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        schema::all().filter(|n| !self.0.contains_key(*n)).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<(&'a str, f64)> for FeatureVector {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        FeatureVector(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}
