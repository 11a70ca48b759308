//! Health record shapes and the ingestion boundary.
//!
//! Records arrive from storage as loosely-typed JSON, newest first. Each
//! record is parsed on its own: a malformed record is dropped with a warning
//! and never poisons the rest of its category. Nested lab sub-panels are
//! flattened into [`LabPanel`] here so downstream code only sees flat
//! measurements.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;

/// The time-series categories of a user's health data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    LabData,
    LifestyleData,
    MentalHealthData,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 3] = [
        RecordCategory::LabData,
        RecordCategory::LifestyleData,
        RecordCategory::MentalHealthData,
    ];

    /// Storage and JSON key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::LabData => "lab_data",
            RecordCategory::LifestyleData => "lifestyle_data",
            RecordCategory::MentalHealthData => "mental_health_data",
        }
    }

    /// URL path segment for this category (e.g. `/records/mental-health`).
    pub fn slug(&self) -> &'static str {
        match self {
            RecordCategory::LabData => "lab",
            RecordCategory::LifestyleData => "lifestyle",
            RecordCategory::MentalHealthData => "mental-health",
        }
    }

    /// How far back records of this category are considered, in days.
    pub fn window_days(&self) -> i64 {
        match self {
            RecordCategory::LabData => 360,
            RecordCategory::LifestyleData => 90,
            RecordCategory::MentalHealthData => 180,
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.slug() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiverEnzymes {
    pub alt: Option<f64>,
    pub ast: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KidneyFunction {
    pub creatinine: Option<f64>,
    pub bun: Option<f64>,
}

/// One laboratory visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    pub test_date: Option<jiff::civil::Date>,
    pub glucose: Option<f64>,
    pub hba1c: Option<f64>,
    pub cholesterol: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
    pub triglycerides: Option<f64>,
    pub blood_pressure_systolic: Option<f64>,
    pub blood_pressure_diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub liver_enzymes: Option<LiverEnzymes>,
    pub kidney_function: Option<KidneyFunction>,
}

/// A lab record with its sub-panels flattened to top-level measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabPanel {
    pub glucose: Option<f64>,
    pub hba1c: Option<f64>,
    pub cholesterol: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
    pub triglycerides: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub alt: Option<f64>,
    pub ast: Option<f64>,
    pub creatinine: Option<f64>,
    pub bun: Option<f64>,
}

impl From<&LabRecord> for LabPanel {
    fn from(record: &LabRecord) -> Self {
        let liver = record.liver_enzymes.clone().unwrap_or_default();
        let kidney = record.kidney_function.clone().unwrap_or_default();
        LabPanel {
            glucose: record.glucose,
            hba1c: record.hba1c,
            cholesterol: record.cholesterol,
            hdl: record.hdl,
            ldl: record.ldl,
            triglycerides: record.triglycerides,
            systolic: record.blood_pressure_systolic,
            diastolic: record.blood_pressure_diastolic,
            heart_rate: record.heart_rate,
            alt: liver.alt,
            ast: liver.ast,
            creatinine: kidney.creatinine,
            bun: kidney.bun,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
    pub snacks: Option<u32>,
}

impl Meals {
    /// Number of main meals taken (0-3).
    pub fn main_meals(&self) -> u32 {
        [self.breakfast, self.lunch, self.dinner]
            .into_iter()
            .filter(|taken| *taken)
            .count() as u32
    }
}

/// One day of lifestyle logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifestyleRecord {
    pub date: Option<jiff::civil::Date>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub exercise_minutes: Option<f64>,
    pub exercise_type: Option<String>,
    pub steps: Option<f64>,
    pub water_intake_ml: Option<f64>,
    pub alcohol_units: Option<f64>,
    pub smoking: Option<bool>,
    pub diet_quality: Option<String>,
    pub meals: Option<Meals>,
}

/// One mental-health check-in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentalHealthRecord {
    pub date: Option<jiff::civil::Date>,
    pub stress_level: Option<f64>,
    pub mood: Option<String>,
    pub anxiety_level: Option<f64>,
    pub social_interaction: Option<String>,
    pub work_life_balance: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub therapy_sessions: Option<u32>,
}

/// Family medical history snapshot: condition → affected relatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyHistory {
    #[serde(flatten)]
    pub conditions: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FamilyHistory {
    /// Lenient parse: list-valued keys become conditions, `notes` is kept,
    /// anything else (timestamps, stray scalars) is ignored.
    pub fn from_value(value: &Value) -> Option<FamilyHistory> {
        let obj = value.as_object()?;
        let mut history = FamilyHistory::default();
        for (key, entry) in obj {
            match entry {
                Value::Array(items) => {
                    let relatives = items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                    history.conditions.insert(key.clone(), relatives);
                }
                Value::String(text) if key == "notes" => history.notes = Some(text.clone()),
                _ => {}
            }
        }
        Some(history)
    }

    /// Number of relatives recorded for `condition`.
    pub fn relatives(&self, condition: &str) -> usize {
        self.conditions.get(condition).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.notes.is_none()
    }
}

/// Everything the pipeline knows about one user. Sequences are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthRecordSet {
    #[serde(default)]
    pub lab_data: Vec<LabRecord>,
    #[serde(default)]
    pub lifestyle_data: Vec<LifestyleRecord>,
    #[serde(default)]
    pub mental_health_data: Vec<MentalHealthRecord>,
    #[serde(default)]
    pub family_history: Option<FamilyHistory>,
}

impl HealthRecordSet {
    /// Build a record set from raw JSON shaped like
    /// `{"lab_data": [...], "lifestyle_data": [...], "mental_health_data": [...], "family_history": {...}}`.
    pub fn from_raw(raw: &Value) -> HealthRecordSet {
        HealthRecordSet {
            lab_data: parse_category(raw.get(RecordCategory::LabData.as_str()), RecordCategory::LabData),
            lifestyle_data: parse_category(
                raw.get(RecordCategory::LifestyleData.as_str()),
                RecordCategory::LifestyleData,
            ),
            mental_health_data: parse_category(
                raw.get(RecordCategory::MentalHealthData.as_str()),
                RecordCategory::MentalHealthData,
            ),
            family_history: raw.get("family_history").and_then(FamilyHistory::from_value),
        }
    }

    /// True when no category holds any data at all.
    pub fn is_empty(&self) -> bool {
        self.lab_data.is_empty()
            && self.lifestyle_data.is_empty()
            && self.mental_health_data.is_empty()
            && self.family_history.as_ref().is_none_or(FamilyHistory::is_empty)
    }

    pub fn record_count(&self, category: RecordCategory) -> usize {
        match category {
            RecordCategory::LabData => self.lab_data.len(),
            RecordCategory::LifestyleData => self.lifestyle_data.len(),
            RecordCategory::MentalHealthData => self.mental_health_data.len(),
        }
    }
}

/// Parse one record of a category from JSON.
pub fn parse_record<T: DeserializeOwned>(value: &Value) -> Result<T, CoreError> {
    Ok(T::deserialize(value)?)
}

fn parse_category<T: DeserializeOwned>(raw: Option<&Value>, category: RecordCategory) -> Vec<T> {
    let items = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!(category = %category, "category is not a list, using defaults");
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match parse_record::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(category = %category, index, error = %e, "dropping malformed record");
                None
            }
        })
        .collect()
}
