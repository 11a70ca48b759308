use medrisk_predictor::multi_output::{MultiOutputModel, SeverityTier};
use medrisk_predictor::PredictError;
use serde_json::{json, Map, Value};

fn model() -> MultiOutputModel {
    serde_json::from_value(json!({
        "numeric_cols": ["age", "creatinine"],
        "categorical_cols": ["sex"],
        "encoder": {"categories": [["female", "male"]]},
        "target_prob_cols": ["risk_ckd_prob", "risk_cad_prob"],
        "clf": {"estimators": [
            {"kind": "logistic", "classes": [0, 1],
             "coefficients": [0.0, 1.0, 0.0, 0.0], "intercept": -3.0},
            {"kind": "logistic", "classes": [0, 1],
             "coefficients": [0.0, 0.0, 0.0, 2.0], "intercept": -5.0}
        ]}
    }))
    .unwrap()
}

fn input(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn severity_tier_boundaries() {
    assert_eq!(SeverityTier::from_probability(0.0), SeverityTier::VeryLow);
    assert_eq!(SeverityTier::from_probability(0.001), SeverityTier::Low);
    assert_eq!(SeverityTier::from_probability(0.01), SeverityTier::Moderate);
    assert_eq!(SeverityTier::from_probability(0.05), SeverityTier::High);
    assert_eq!(SeverityTier::from_probability(0.2), SeverityTier::Critical);
    assert_eq!(serde_json::to_value(SeverityTier::VeryLow).unwrap(), "Very Low");
}

#[test]
fn missing_inputs_become_zero_and_unknown() {
    let m = model();
    let row = m.encode(&input(json!({"creatinine": "1.5"}))).unwrap();
    assert_eq!(row, vec![0.0, 1.5, 0.0, 0.0]);

    let row = m.encode(&input(json!({"age": 61, "sex": "male"}))).unwrap();
    assert_eq!(row, vec![61.0, 0.0, 0.0, 1.0]);

    // Unrecognised categories leave the block empty.
    let row = m.encode(&input(json!({"sex": "other", "age": "n/a"}))).unwrap();
    assert_eq!(row, vec![0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn predicts_every_target_with_a_tier() {
    let m = model();
    let out = m.predict(&input(json!({"creatinine": 3.0, "sex": "male"}))).unwrap();

    assert_eq!(out.len(), 2);
    let ckd = &out["risk_ckd_prob"];
    assert!((ckd.probability - 0.5).abs() < 1e-12);
    assert_eq!(ckd.level, SeverityTier::Critical);

    let cad = &out["risk_cad_prob"];
    let expected = 1.0 / (1.0 + 3.0_f64.exp());
    assert!((cad.probability - expected).abs() < 1e-12);
    assert_eq!(cad.level, SeverityTier::Moderate);
}

#[test]
fn estimator_count_must_match_targets() {
    let mut m = model();
    m.target_prob_cols.push("risk_aki_prob".into());
    let err = m.predict(&input(json!({}))).unwrap_err();
    assert!(matches!(err, PredictError::InvalidArtifact(_)));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MultiOutputModel::load(&dir.path().join("model.json")).unwrap_err();
    assert!(matches!(err, PredictError::Io { .. }));

    let path = dir.path().join("model.json");
    std::fs::write(&path, serde_json::to_vec(&model()).unwrap()).unwrap();
    assert!(MultiOutputModel::load(&path).is_ok());
}
