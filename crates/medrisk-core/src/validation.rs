//! Input validation for submitted health records.
//!
//! Runs on the raw JSON body before a record is stored, so callers get a
//! field-level message instead of a silently dropped record later on.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::records::{LabRecord, LifestyleRecord, MentalHealthRecord, RecordCategory};
use crate::vocab;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Inclusive numeric range for a measurement.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    field: &'static str,
    min: f64,
    max: f64,
}

const fn bounds(field: &'static str, min: f64, max: f64) -> Bounds {
    Bounds { field, min, max }
}

const LAB_BOUNDS: &[Bounds] = &[
    bounds("glucose", 0.0, 500.0),
    bounds("hba1c", 0.0, 20.0),
    bounds("cholesterol", 0.0, 500.0),
    bounds("hdl", 0.0, 200.0),
    bounds("ldl", 0.0, 400.0),
    bounds("triglycerides", 0.0, 1000.0),
    bounds("blood_pressure_systolic", 50.0, 250.0),
    bounds("blood_pressure_diastolic", 30.0, 150.0),
    bounds("heart_rate", 30.0, 200.0),
];

const LIFESTYLE_BOUNDS: &[Bounds] = &[
    bounds("sleep_hours", 0.0, 24.0),
    bounds("exercise_minutes", 0.0, 1440.0),
    bounds("steps", 0.0, 100_000.0),
];

const MENTAL_HEALTH_BOUNDS: &[Bounds] = &[
    bounds("stress_level", 1.0, 10.0),
    bounds("anxiety_level", 1.0, 10.0),
];

/// Validate a submitted record for `category`.
pub fn validate_record(category: RecordCategory, data: &Value) -> Result<(), ValidationError> {
    match category {
        RecordCategory::LabData => validate_lab(data),
        RecordCategory::LifestyleData => validate_lifestyle(data),
        RecordCategory::MentalHealthData => validate_mental_health(data),
    }
}

pub fn validate_lab(data: &Value) -> Result<(), ValidationError> {
    require_date(data, "test_date")?;
    check_bounds(data, LAB_BOUNDS)?;
    check_shape::<LabRecord>(data)
}

pub fn validate_lifestyle(data: &Value) -> Result<(), ValidationError> {
    require_date(data, "date")?;
    check_bounds(data, LIFESTYLE_BOUNDS)?;
    check_vocabulary(data, "sleep_quality", vocab::SLEEP_QUALITY)?;
    check_vocabulary(data, "diet_quality", vocab::DIET_QUALITY)?;
    check_shape::<LifestyleRecord>(data)
}

pub fn validate_mental_health(data: &Value) -> Result<(), ValidationError> {
    require_date(data, "date")?;
    check_bounds(data, MENTAL_HEALTH_BOUNDS)?;
    check_vocabulary(data, "mood", vocab::MOOD)?;
    check_shape::<MentalHealthRecord>(data)
}

/// The record must parse into its typed shape, or the loader would drop it.
fn check_shape<T: DeserializeOwned>(data: &Value) -> Result<(), ValidationError> {
    T::deserialize(data)
        .map(|_| ())
        .map_err(|e| ValidationError::new("record", format!("Invalid record: {e}")))
}

fn require_date(data: &Value, field: &str) -> Result<(), ValidationError> {
    let raw = data
        .get(field)
        .ok_or_else(|| ValidationError::new(field, format!("Missing required field: {field}")))?;
    let text = raw
        .as_str()
        .ok_or_else(|| ValidationError::new(field, format!("{field} must be a date (YYYY-MM-DD)")))?;
    text.parse::<jiff::civil::Date>()
        .map_err(|_| ValidationError::new(field, format!("{field} must be a date (YYYY-MM-DD)")))?;
    Ok(())
}

fn check_bounds(data: &Value, rules: &[Bounds]) -> Result<(), ValidationError> {
    for rule in rules {
        let Some(raw) = data.get(rule.field) else {
            continue;
        };
        let value = raw
            .as_f64()
            .ok_or_else(|| ValidationError::new(rule.field, format!("{} must be a number", rule.field)))?;
        if !(rule.min..=rule.max).contains(&value) {
            return Err(ValidationError::new(
                rule.field,
                format!("{} must be between {} and {}", rule.field, rule.min, rule.max),
            ));
        }
    }
    Ok(())
}

fn check_vocabulary(
    data: &Value,
    field: &str,
    vocabulary: &[(&'static str, f64)],
) -> Result<(), ValidationError> {
    let Some(raw) = data.get(field) else {
        return Ok(());
    };
    let accepted = vocab::values(vocabulary);
    match raw.as_str() {
        Some(value) if accepted.contains(&value) => Ok(()),
        _ => Err(ValidationError::new(
            field,
            format!("{field} must be one of: {}", accepted.join(", ")),
        )),
    }
}
