use medrisk_core::features::{flag, name, schema, FeatureVector};
use medrisk_core::records::{HealthRecordSet, LifestyleRecord};
use medrisk_core::vocab;

use crate::stats::{fraction, mean, sample_std};
use crate::CategoryExtractor;

const DEFAULT_SLEEP_HOURS: f64 = 7.0;
const DEFAULT_SLEEP_CONSISTENCY: f64 = 0.5;
const DEFAULT_QUALITY_SCORE: f64 = 2.5;
const DEFAULT_WATER_ML: f64 = 2000.0;
const DEFAULT_MEAL_REGULARITY: f64 = 0.8;

const DEHYDRATION_WATER_ML: f64 = 1500.0;
const SEDENTARY_STEPS: f64 = 5000.0;
const SEDENTARY_EXERCISE_MINUTES: f64 = 20.0;

/// Lifestyle logs averaged over the observation window.
pub struct LifestyleExtractor;

impl CategoryExtractor for LifestyleExtractor {
    fn id(&self) -> &str {
        "lifestyle_data"
    }

    fn feature_names(&self) -> &'static [&'static str] {
        schema::LIFESTYLE
    }

    fn defaults(&self) -> FeatureVector {
        [
            (name::AVG_SLEEP_HOURS, DEFAULT_SLEEP_HOURS),
            (name::SLEEP_CONSISTENCY, DEFAULT_SLEEP_CONSISTENCY),
            (name::POOR_SLEEP_DAYS, 0.0),
            (name::SLEEP_QUALITY_SCORE, DEFAULT_QUALITY_SCORE),
            (name::AVG_EXERCISE_MINUTES, 0.0),
            (name::EXERCISE_FREQUENCY, 0.0),
            (name::AVG_STEPS, SEDENTARY_STEPS),
            (name::AVG_WATER_INTAKE, DEFAULT_WATER_ML),
            (name::DEHYDRATION_RISK, 0.0),
            (name::AVG_ALCOHOL_UNITS, 0.0),
            (name::SMOKING, 0.0),
            (name::DIET_QUALITY_SCORE, DEFAULT_QUALITY_SCORE),
            (name::MEAL_REGULARITY, DEFAULT_MEAL_REGULARITY),
            (name::SEDENTARY_LIFESTYLE, 1.0),
        ]
        .into_iter()
        .collect()
    }

    fn has_data(&self, records: &HealthRecordSet) -> bool {
        !records.lifestyle_data.is_empty()
    }

    fn extract(&self, records: &HealthRecordSet) -> FeatureVector {
        let logs = &records.lifestyle_data;
        let mut v = FeatureVector::new();

        let sleep = values(logs, |r| r.sleep_hours);
        let avg_sleep = mean(&sleep).unwrap_or(DEFAULT_SLEEP_HOURS);
        v.insert(name::AVG_SLEEP_HOURS, avg_sleep);
        v.insert(name::SLEEP_CONSISTENCY, sleep_consistency(&sleep));
        let poor_days = logs
            .iter()
            .filter(|r| r.sleep_quality.as_deref() == Some("poor"))
            .count();
        v.insert(name::POOR_SLEEP_DAYS, poor_days as f64);
        v.insert(
            name::SLEEP_QUALITY_SCORE,
            ordinal_mean(logs, |r| r.sleep_quality.as_deref(), vocab::SLEEP_QUALITY),
        );

        let exercise = values(logs, |r| r.exercise_minutes);
        let avg_exercise = mean(&exercise).unwrap_or(0.0);
        v.insert(name::AVG_EXERCISE_MINUTES, avg_exercise);
        let active_days = exercise.iter().filter(|m| **m > 0.0).count();
        v.insert(name::EXERCISE_FREQUENCY, fraction(active_days, logs.len()));

        let avg_steps = mean(&values(logs, |r| r.steps)).unwrap_or(0.0);
        v.insert(name::AVG_STEPS, avg_steps);

        let avg_water = mean(&values(logs, |r| r.water_intake_ml)).unwrap_or(DEFAULT_WATER_ML);
        v.insert(name::AVG_WATER_INTAKE, avg_water);
        v.insert(name::DEHYDRATION_RISK, flag(avg_water < DEHYDRATION_WATER_ML));

        v.insert(
            name::AVG_ALCOHOL_UNITS,
            mean(&values(logs, |r| r.alcohol_units)).unwrap_or(0.0),
        );
        v.insert(
            name::SMOKING,
            flag(logs.iter().any(|r| r.smoking == Some(true))),
        );

        v.insert(
            name::DIET_QUALITY_SCORE,
            ordinal_mean(logs, |r| r.diet_quality.as_deref(), vocab::DIET_QUALITY),
        );

        let meal_shares: Vec<f64> = logs
            .iter()
            .filter_map(|r| r.meals.as_ref())
            .map(|m| f64::from(m.main_meals()) / 3.0)
            .collect();
        v.insert(
            name::MEAL_REGULARITY,
            mean(&meal_shares).unwrap_or(DEFAULT_MEAL_REGULARITY),
        );

        // Both conditions must hold: low steps alone is not sedentary.
        v.insert(
            name::SEDENTARY_LIFESTYLE,
            flag(avg_steps < SEDENTARY_STEPS && avg_exercise < SEDENTARY_EXERCISE_MINUTES),
        );

        v
    }
}

fn values(logs: &[LifestyleRecord], field: fn(&LifestyleRecord) -> Option<f64>) -> Vec<f64> {
    logs.iter().filter_map(field).collect()
}

/// `1 − sd/mean` of nightly sleep. A single night counts as perfectly consistent.
fn sleep_consistency(sleep: &[f64]) -> f64 {
    match mean(sleep) {
        Some(m) if m > 0.0 => 1.0 - sample_std(sleep).unwrap_or(0.0) / m,
        _ => DEFAULT_SLEEP_CONSISTENCY,
    }
}

/// Mean ordinal code of a categorical field; unrecognised values are skipped.
fn ordinal_mean(
    logs: &[LifestyleRecord],
    field: fn(&LifestyleRecord) -> Option<&str>,
    vocabulary: &[(&str, f64)],
) -> f64 {
    let codes: Vec<f64> = logs
        .iter()
        .filter_map(field)
        .filter_map(|value| vocab::ordinal(vocabulary, value))
        .collect();
    mean(&codes).unwrap_or(DEFAULT_QUALITY_SCORE)
}
