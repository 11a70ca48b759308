//! Newest-versus-oldest change analysis for the analytics endpoint.

use medrisk_core::records::{HealthRecordSet, LabPanel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stats::round2;

/// Relative changes smaller than this (in percent) count as stable.
const STABLE_BAND_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TrendStatus {
    InsufficientData,
    Stable,
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricTrend {
    pub status: TrendStatus,
    /// Percent change from the oldest to the newest value.
    pub change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
}

impl MetricTrend {
    fn insufficient() -> Self {
        MetricTrend {
            status: TrendStatus::InsufficientData,
            change: 0.0,
            latest: None,
            previous: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthTrends {
    pub glucose_trend: MetricTrend,
    pub bp_trend: MetricTrend,
    pub exercise_trend: MetricTrend,
    pub sleep_trend: MetricTrend,
}

/// Trend of one metric over newest-first observations.
///
/// Missing and zero observations are skipped.
pub fn metric_trend<I>(newest_first: I) -> MetricTrend
where
    I: IntoIterator<Item = Option<f64>>,
{
    let values: Vec<f64> = newest_first
        .into_iter()
        .flatten()
        .filter(|v| *v != 0.0 && v.is_finite())
        .collect();

    let (Some(&newest), Some(&oldest)) = (values.first(), values.last()) else {
        return MetricTrend::insufficient();
    };
    if values.len() < 2 {
        return MetricTrend::insufficient();
    }

    let change = (newest - oldest) / oldest * 100.0;
    let status = if change.abs() < STABLE_BAND_PERCENT {
        TrendStatus::Stable
    } else if change > 0.0 {
        TrendStatus::Increasing
    } else {
        TrendStatus::Decreasing
    };

    MetricTrend {
        status,
        change: round2(change),
        latest: Some(newest),
        previous: Some(oldest),
    }
}

/// Glucose and systolic pressure from labs, exercise and sleep from lifestyle logs.
pub fn health_trends(records: &HealthRecordSet) -> HealthTrends {
    let panels: Vec<LabPanel> = records.lab_data.iter().map(LabPanel::from).collect();
    let logs = &records.lifestyle_data;

    HealthTrends {
        glucose_trend: metric_trend(panels.iter().map(|p| p.glucose)),
        bp_trend: metric_trend(panels.iter().map(|p| p.systolic)),
        exercise_trend: metric_trend(logs.iter().map(|r| r.exercise_minutes)),
        sleep_trend: metric_trend(logs.iter().map(|r| r.sleep_hours)),
    }
}
