use medrisk_core::features::{flag, name, schema, FeatureVector};
use medrisk_core::records::{HealthRecordSet, LabPanel};

use crate::stats::{ols_slope, sample_std};
use crate::CategoryExtractor;

/// Laboratory results: latest point values, per-metric trends and
/// variability across visits, derived ratios, and clinical band flags.
pub struct LabExtractor;

impl CategoryExtractor for LabExtractor {
    fn id(&self) -> &str {
        "lab_data"
    }

    fn feature_names(&self) -> &'static [&'static str] {
        schema::LAB
    }

    fn defaults(&self) -> FeatureVector {
        schema::LAB.iter().map(|n| (*n, 0.0)).collect()
    }

    fn has_data(&self, records: &HealthRecordSet) -> bool {
        !records.lab_data.is_empty()
    }

    fn extract(&self, records: &HealthRecordSet) -> FeatureVector {
        let panels: Vec<LabPanel> = records.lab_data.iter().map(LabPanel::from).collect();
        let latest = panels.first().copied().unwrap_or_default();
        let mut v = FeatureVector::new();

        let glucose = latest.glucose.unwrap_or(0.0);
        let cholesterol = latest.cholesterol.unwrap_or(0.0);
        let hdl = latest.hdl.unwrap_or(0.0);
        let systolic = latest.systolic.unwrap_or(0.0);
        let diastolic = latest.diastolic.unwrap_or(0.0);

        v.insert(name::GLUCOSE_LATEST, glucose);
        v.insert(name::HBA1C_LATEST, latest.hba1c.unwrap_or(0.0));
        v.insert(name::CHOLESTEROL_LATEST, cholesterol);
        v.insert(name::HDL_LATEST, hdl);
        v.insert(name::LDL_LATEST, latest.ldl.unwrap_or(0.0));
        v.insert(name::TRIGLYCERIDES_LATEST, latest.triglycerides.unwrap_or(0.0));
        v.insert(name::BP_SYSTOLIC_LATEST, systolic);
        v.insert(name::BP_DIASTOLIC_LATEST, diastolic);
        v.insert(name::HEART_RATE_LATEST, latest.heart_rate.unwrap_or(0.0));
        v.insert(name::ALT_LATEST, latest.alt.unwrap_or(0.0));
        v.insert(name::AST_LATEST, latest.ast.unwrap_or(0.0));
        v.insert(name::CREATININE_LATEST, latest.creatinine.unwrap_or(0.0));
        v.insert(name::BUN_LATEST, latest.bun.unwrap_or(0.0));

        // Input is newest first; trends are fitted oldest to newest.
        let chronological: Vec<LabPanel> = panels.iter().rev().copied().collect();
        let multi = panels.len() >= 2;
        let trend = |metric: fn(&LabPanel) -> Option<f64>| {
            if !multi {
                return 0.0;
            }
            ols_slope(&present(&chronological, metric)).unwrap_or(0.0)
        };
        let variability = |metric: fn(&LabPanel) -> Option<f64>| {
            if !multi {
                return 0.0;
            }
            sample_std(&present(&panels, metric)).unwrap_or(0.0)
        };

        v.insert(name::GLUCOSE_TREND, trend(|p| p.glucose));
        v.insert(name::HBA1C_TREND, trend(|p| p.hba1c));
        v.insert(name::BP_SYSTOLIC_TREND, trend(|p| p.systolic));
        v.insert(name::CHOLESTEROL_TREND, trend(|p| p.cholesterol));
        v.insert(name::GLUCOSE_VARIABILITY, variability(|p| p.glucose));
        v.insert(name::BP_VARIABILITY, variability(|p| p.systolic));

        let ratio = if hdl > 0.0 { cholesterol / hdl } else { 0.0 };
        v.insert(name::CHOLESTEROL_HDL_RATIO, ratio);
        v.insert(name::PULSE_PRESSURE, systolic - diastolic);

        v.insert(name::PREDIABETES_FLAG, flag((100.0..=125.0).contains(&glucose)));
        v.insert(
            name::PREHYPERTENSION_FLAG,
            flag((120.0..=139.0).contains(&systolic)),
        );

        v
    }
}

/// Values of `metric` across `panels`, skipping visits that did not measure it.
fn present(panels: &[LabPanel], metric: fn(&LabPanel) -> Option<f64>) -> Vec<f64> {
    panels.iter().filter_map(metric).collect()
}
