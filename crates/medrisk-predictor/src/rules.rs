//! Clinical threshold rules used when no trained model is available.

use medrisk_core::features::{name, FeatureVector};
use medrisk_core::models::disease::Disease;

use crate::error::PredictError;

/// Rule-based probability for `disease`.
///
/// Fails only when a feature the rule reads is missing or not finite.
pub fn rule_probability(disease: Disease, f: &FeatureVector) -> Result<f64, PredictError> {
    let p = match disease {
        Disease::Diabetes => diabetes(f)?,
        Disease::Hypertension => hypertension(f)?,
        Disease::LiverDisease => liver_disease(f)?,
        Disease::CardiacRisk => cardiac_risk(f)?,
        Disease::MentalHealth => mental_health(f)?,
    };
    Ok(p)
}

fn diabetes(f: &FeatureVector) -> Result<f64, PredictError> {
    let glucose = f.require(name::GLUCOSE_LATEST)?;
    let hba1c = f.require(name::HBA1C_LATEST)?;

    let mut risk: f64 = if glucose >= 126.0 || hba1c >= 6.5 {
        0.8
    } else if glucose >= 100.0 || hba1c >= 5.7 {
        0.5
    } else {
        0.2
    };
    if f.flag(name::HAS_FAMILY_DIABETES) {
        risk += 0.15;
    }
    if f.flag(name::SEDENTARY_LIFESTYLE) {
        risk += 0.1;
    }
    Ok(risk.min(1.0))
}

fn hypertension(f: &FeatureVector) -> Result<f64, PredictError> {
    let systolic = f.require(name::BP_SYSTOLIC_LATEST)?;
    let diastolic = f.require(name::BP_DIASTOLIC_LATEST)?;

    let mut risk: f64 = if systolic >= 140.0 || diastolic >= 90.0 {
        0.8
    } else if systolic >= 130.0 || diastolic >= 85.0 {
        0.5
    } else {
        0.2
    };
    if f.flag(name::HAS_FAMILY_HYPERTENSION) {
        risk += 0.15;
    }
    Ok(risk.min(1.0))
}

fn liver_disease(f: &FeatureVector) -> Result<f64, PredictError> {
    let alt = f.require(name::ALT_LATEST)?;
    let ast = f.require(name::AST_LATEST)?;
    let alcohol = f.require(name::AVG_ALCOHOL_UNITS)?;

    let mut risk: f64 = if alt > 40.0 || ast > 40.0 {
        0.6
    } else if alt > 30.0 || ast > 30.0 {
        0.4
    } else {
        0.15
    };
    if alcohol > 2.0 {
        risk += 0.2;
    }
    Ok(risk.min(1.0))
}

fn cardiac_risk(f: &FeatureVector) -> Result<f64, PredictError> {
    let cholesterol = f.require(name::CHOLESTEROL_LATEST)?;
    let systolic = f.require(name::BP_SYSTOLIC_LATEST)?;

    let factors = [
        cholesterol > 240.0,
        systolic > 140.0,
        f.flag(name::SMOKING),
        f.flag(name::HAS_FAMILY_HEART_DISEASE),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    Ok((0.2 + factors as f64 * 0.15).min(0.9))
}

fn mental_health(f: &FeatureVector) -> Result<f64, PredictError> {
    let stress = f.require(name::AVG_STRESS_LEVEL)?;
    let mood = f.require(name::AVG_MOOD_SCORE)?;
    let sleep = f.require(name::AVG_SLEEP_HOURS)?;

    let mut risk: f64 = if stress >= 8.0 || mood <= 2.0 {
        0.7
    } else if stress >= 6.0 || mood <= 2.5 {
        0.5
    } else {
        0.25
    };
    if sleep < 6.0 {
        risk += 0.15;
    }
    Ok(risk.min(1.0))
}
