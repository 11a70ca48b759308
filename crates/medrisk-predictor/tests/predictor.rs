use std::fs;

use medrisk_core::features::{name, schema, FeatureVector};
use medrisk_core::models::disease::Disease;
use medrisk_features::FeatureEngineer;
use medrisk_predictor::artifact::ModelArtifact;
use medrisk_predictor::registry::artifact_path;
use medrisk_predictor::{DiseaseRiskPredictor, ModelRegistry};
use serde_json::json;

fn defaults() -> FeatureVector {
    FeatureEngineer::new().default_vector()
}

fn glucose_logistic() -> ModelArtifact {
    serde_json::from_value(json!({
        "feature_names": ["glucose_latest"],
        "scaler": {"mean": [100.0], "scale": [10.0]},
        "classifier": {
            "kind": "logistic",
            "classes": [0, 1],
            "coefficients": [1.0],
            "intercept": 0.0
        }
    }))
    .unwrap()
}

/// Expects three inputs but names none, so it receives the whole schema.
fn mismatched() -> ModelArtifact {
    serde_json::from_value(json!({
        "scaler": {"mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]},
        "classifier": {
            "kind": "logistic",
            "classes": [0, 1],
            "coefficients": [0.1, 0.2, 0.3],
            "intercept": 0.0
        }
    }))
    .unwrap()
}

#[test]
fn default_vector_scores_every_disease_in_unit_interval() {
    let scores = DiseaseRiskPredictor::rule_based().predict(&defaults());
    assert_eq!(scores.len(), Disease::ALL.len());
    for disease in Disease::ALL {
        let p = scores[disease.as_str()];
        assert!((0.0..=1.0).contains(&p), "{disease}: {p}");
    }
}

#[test]
fn trained_model_is_used_when_fitted() {
    let registry = ModelRegistry::from_artifacts([(Disease::Diabetes, glucose_logistic())]);
    let predictor = DiseaseRiskPredictor::new(&registry);
    assert!(predictor.strategy(Disease::Diabetes).unwrap().is_trained());
    assert!(!predictor.strategy(Disease::Hypertension).unwrap().is_trained());

    let mut v = defaults();
    v.insert(name::GLUCOSE_LATEST, 100.0);
    let scores = predictor.predict(&v);
    assert!((scores["diabetes"] - 0.5).abs() < 1e-12);
}

#[test]
fn failing_model_falls_back_for_that_disease_only() {
    let mut v = defaults();
    v.insert(name::BP_SYSTOLIC_LATEST, 150.0);
    v.insert(name::GLUCOSE_LATEST, 100.0);
    let rules_only = DiseaseRiskPredictor::rule_based().predict(&v);

    let registry = ModelRegistry::from_artifacts([
        (Disease::Diabetes, glucose_logistic()),
        (Disease::Hypertension, mismatched()),
    ]);
    let scores = DiseaseRiskPredictor::new(&registry).predict(&v);

    assert_eq!(scores["hypertension"], rules_only["hypertension"]);
    assert!((scores["diabetes"] - 0.5).abs() < 1e-12);
    for disease in ["liver_disease", "cardiac_risk", "mental_health"] {
        assert_eq!(scores[disease], rules_only[disease]);
    }
}

#[test]
fn unfitted_classifier_selects_rules() {
    let mut artifact = glucose_logistic();
    if let medrisk_predictor::artifact::Classifier::Logistic(m) = &mut artifact.classifier {
        m.classes.clear();
    }
    let registry = ModelRegistry::from_artifacts([(Disease::Diabetes, artifact)]);
    let predictor = DiseaseRiskPredictor::new(&registry);
    assert!(!predictor.strategy(Disease::Diabetes).unwrap().is_trained());
}

#[test]
fn forest_and_boosted_ensembles() {
    let forest: ModelArtifact = serde_json::from_value(json!({
        "feature_names": ["glucose_latest", "bp_systolic_latest"],
        "scaler": {"mean": [0.0, 0.0], "scale": [0.0, 1.0]},
        "classifier": {
            "kind": "tree_ensemble",
            "classes": [0, 1],
            "n_features": 2,
            "aggregation": "mean",
            "trees": [
                {"nodes": [
                    {"type": "split", "feature": 0, "threshold": 125.0, "left": 1, "right": 2},
                    {"type": "leaf", "value": 0.1},
                    {"type": "leaf", "value": 0.9}
                ]},
                {"nodes": [
                    {"type": "split", "feature": 1, "threshold": 139.0, "left": 1, "right": 2},
                    {"type": "leaf", "value": 0.2},
                    {"type": "leaf", "value": 0.6}
                ]}
            ]
        }
    }))
    .unwrap();

    let boosted: ModelArtifact = serde_json::from_value(json!({
        "feature_names": ["alt_latest"],
        "scaler": {"mean": [0.0], "scale": [1.0]},
        "classifier": {
            "kind": "tree_ensemble",
            "classes": [0, 1],
            "n_features": 1,
            "aggregation": "logit_sum",
            "base_score": 0.0,
            "learning_rate": 0.5,
            "trees": [{"nodes": [{"type": "leaf", "value": 0.0}]}]
        }
    }))
    .unwrap();

    let registry = ModelRegistry::from_artifacts([
        (Disease::CardiacRisk, forest),
        (Disease::LiverDisease, boosted),
    ]);
    let predictor = DiseaseRiskPredictor::new(&registry);

    let mut v = defaults();
    v.insert(name::GLUCOSE_LATEST, 130.0);
    v.insert(name::BP_SYSTOLIC_LATEST, 120.0);
    let scores = predictor.predict(&v);
    assert!((scores["cardiac_risk"] - 0.55).abs() < 1e-12);
    assert!((scores["liver_disease"] - 0.5).abs() < 1e-12);
}

#[test]
fn load_dir_reads_artifacts_and_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        artifact_path(dir.path(), Disease::Diabetes),
        serde_json::to_vec(&glucose_logistic()).unwrap(),
    )
    .unwrap();
    fs::write(artifact_path(dir.path(), Disease::Hypertension), b"{not json").unwrap();

    let registry = ModelRegistry::load_dir(dir.path());
    assert_eq!(registry.len(), 1);
    assert!(registry.get(Disease::Diabetes).is_some());
    assert!(registry.get(Disease::Hypertension).is_none());

    let missing = ModelRegistry::load_dir(dir.path().join("nope"));
    assert!(missing.is_empty());
}

#[test]
fn full_schema_model_reads_every_feature_in_order() {
    let n = schema::len();
    let mut coefficients = vec![0.0; n];
    let position = schema::all().position(|f| f == name::SMOKING).unwrap();
    coefficients[position] = 2.0;

    let artifact: ModelArtifact = serde_json::from_value(json!({
        "scaler": {"mean": vec![0.0; n], "scale": vec![1.0; n]},
        "classifier": {
            "kind": "logistic",
            "classes": [0, 1],
            "coefficients": coefficients,
            "intercept": -1.0
        }
    }))
    .unwrap();
    let predictor = DiseaseRiskPredictor::new(&ModelRegistry::from_artifacts([(
        Disease::CardiacRisk,
        artifact,
    )]));

    let mut v = defaults();
    v.insert(name::SMOKING, 1.0);
    let p = predictor.predict(&v)["cardiac_risk"];
    let expected = 1.0 / (1.0 + (-1.0_f64).exp());
    assert!((p - expected).abs() < 1e-12);
}
