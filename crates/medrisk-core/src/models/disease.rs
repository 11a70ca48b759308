use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Disease → probability in `[0, 1]`, keyed by the disease wire name.
///
/// Keys are strings rather than [`Disease`] so scores from other sources
/// (e.g. a wider model) can still be reported with default thresholds.
pub type RiskScores = BTreeMap<String, f64>;

/// The diseases the predictor scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Disease {
    Diabetes,
    Hypertension,
    LiverDisease,
    CardiacRisk,
    MentalHealth,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::Hypertension,
        Disease::LiverDisease,
        Disease::CardiacRisk,
        Disease::MentalHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Hypertension => "hypertension",
            Disease::LiverDisease => "liver_disease",
            Disease::CardiacRisk => "cardiac_risk",
            Disease::MentalHealth => "mental_health",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disease {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::UnknownDisease(s.to_string()))
    }
}

/// Human-readable form of a disease key: `liver_disease` → `liver disease`.
pub fn display_name(disease: &str) -> String {
    disease.replace('_', " ")
}
