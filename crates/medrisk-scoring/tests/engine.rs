use std::collections::BTreeMap;

use jiff::Timestamp;
use medrisk_core::features::{name, FeatureVector};
use medrisk_core::models::disease::RiskScores;
use medrisk_core::models::report::{Confidence, ReviewInterval, RiskLevel, Urgency};
use medrisk_core::models::user::UserContext;
use medrisk_features::FeatureEngineer;
use medrisk_scoring::engine::confidence;
use medrisk_scoring::factors::NO_SIGNIFICANT_FACTORS;
use medrisk_scoring::{CutPoints, RiskThresholds, ScoringEngine, ScoringError};

fn user() -> UserContext {
    UserContext {
        id: "u-123".into(),
        name: "Test User".into(),
        email: "test@example.com".into(),
    }
}

fn defaults() -> FeatureVector {
    FeatureEngineer::new().default_vector()
}

fn scores(pairs: &[(&str, f64)]) -> RiskScores {
    pairs.iter().map(|(d, s)| (d.to_string(), *s)).collect()
}

#[test]
fn score_equal_to_cut_point_moves_up_a_level() {
    let cut = CutPoints::new(0.3, 0.5, 0.7);
    assert_eq!(cut.level(0.2999), RiskLevel::Low);
    assert_eq!(cut.level(0.3), RiskLevel::Medium);
    assert_eq!(cut.level(0.5), RiskLevel::High);
    assert_eq!(cut.level(0.7), RiskLevel::VeryHigh);
    assert_eq!(cut.level(1.0), RiskLevel::VeryHigh);
}

#[test]
fn risk_level_is_monotonic_in_score() {
    let engine = ScoringEngine::default();
    for disease in ["diabetes", "liver_disease", "cardiac_risk", "unlisted"] {
        let mut previous = RiskLevel::Low;
        for step in 0..=1000 {
            let level = engine.risk_level(disease, step as f64 / 1000.0);
            assert!(level >= previous, "{disease} at {step}");
            previous = level;
        }
    }
}

#[test]
fn per_disease_defaults_and_fallback() {
    let thresholds = RiskThresholds::default();
    assert_eq!(thresholds.level("liver_disease", 0.25), RiskLevel::Medium);
    assert_eq!(thresholds.level("cardiac_risk", 0.34), RiskLevel::Low);
    assert_eq!(thresholds.for_disease("something_else"), CutPoints::DEFAULT);
}

#[test]
fn priority_actions_order_elevated_before_medium() {
    let thresholds = RiskThresholds::default()
        .with("a", CutPoints::new(0.3, 0.5, 0.85))
        .with("b", CutPoints::new(0.3, 0.7, 0.9));
    let engine = ScoringEngine::new(thresholds);

    let report = engine
        .generate_report(&scores(&[("a", 0.8), ("b", 0.6), ("c", 0.9)]), &defaults(), &user())
        .unwrap();

    assert_eq!(report.risk_assessments["a"].risk_level, RiskLevel::High);
    assert_eq!(report.risk_assessments["b"].risk_level, RiskLevel::Medium);
    assert_eq!(report.risk_assessments["c"].risk_level, RiskLevel::VeryHigh);

    let order: Vec<&str> = report
        .priority_actions
        .iter()
        .map(|a| a.disease.as_str())
        .collect();
    assert_eq!(order, ["c", "a", "b"]);
    assert_eq!(report.priority_actions[0].urgency, Urgency::High);
    assert_eq!(report.priority_actions[2].urgency, Urgency::Medium);
    assert_eq!(report.priority_actions[2].action, "Monitor b risk factors");
}

#[test]
fn priority_ties_keep_disease_name_order() {
    let engine = ScoringEngine::default();
    let report = engine
        .generate_report(
            &scores(&[("mental_health", 0.75), ("diabetes", 0.75), ("hypertension", 0.75)]),
            &defaults(),
            &user(),
        )
        .unwrap();
    let order: Vec<&str> = report
        .priority_actions
        .iter()
        .map(|a| a.disease.as_str())
        .collect();
    assert_eq!(order, ["diabetes", "hypertension", "mental_health"]);
    assert_eq!(
        report.priority_actions[2].action,
        "Consult a healthcare provider for mental health assessment"
    );
}

#[test]
fn overall_score_is_mean_percentage() {
    let report = ScoringEngine::default()
        .generate_report(
            &scores(&[("diabetes", 0.8), ("hypertension", 0.2)]),
            &defaults(),
            &user(),
        )
        .unwrap();
    assert_eq!(report.overall_risk_score, 50.0);
    assert_eq!(report.risk_assessments["diabetes"].risk_score, 80.0);
    assert_eq!(report.next_assessment_date, ReviewInterval::OneMonth);
}

#[test]
fn recommendations_are_capped_and_factors_never_empty() {
    let mut risky = defaults();
    risky.insert(name::SEDENTARY_LIFESTYLE, 1.0);
    risky.insert(name::DIET_QUALITY_SCORE, 1.0);
    risky.insert(name::AVG_STRESS_LEVEL, 9.0);
    risky.insert(name::AVG_ALCOHOL_UNITS, 4.0);
    risky.insert(name::AVG_SLEEP_HOURS, 5.0);
    risky.insert(name::SOCIAL_INTERACTION_SCORE, 1.0);

    let mut healthy = defaults();
    healthy.insert(name::SEDENTARY_LIFESTYLE, 0.0);
    healthy.insert(name::DIET_QUALITY_SCORE, 3.5);
    healthy.insert(name::AVG_MOOD_SCORE, 4.0);
    healthy.insert(name::SOCIAL_INTERACTION_SCORE, 3.0);
    healthy.insert(name::WORK_LIFE_BALANCE_SCORE, 3.0);
    healthy.insert(name::EXERCISE_FREQUENCY, 0.8);

    let engine = ScoringEngine::default();
    let all = scores(&[
        ("diabetes", 0.95),
        ("hypertension", 0.1),
        ("liver_disease", 0.5),
        ("cardiac_risk", 0.6),
        ("mental_health", 0.9),
        ("unlisted", 0.4),
    ]);

    for features in [&risky, &healthy] {
        let report = engine.generate_report(&all, features, &user()).unwrap();
        for (disease, a) in &report.risk_assessments {
            assert!(a.recommendations.len() <= 5, "{disease}");
            assert!(!a.contributing_factors.is_empty(), "{disease}");
        }
    }

    let healthy_report = engine.generate_report(&all, &healthy, &user()).unwrap();
    assert_eq!(
        healthy_report.risk_assessments["mental_health"].contributing_factors,
        vec![NO_SIGNIFICANT_FACTORS.to_string()]
    );

    let risky_report = engine.generate_report(&all, &risky, &user()).unwrap();
    let diabetes = &risky_report.risk_assessments["diabetes"];
    assert_eq!(diabetes.recommendations.len(), 5);
    assert_eq!(diabetes.recommendations[0], "Urgent medical evaluation required");
    assert_eq!(
        diabetes.recommendations[4],
        "Increase physical activity to at least 150 minutes per week"
    );
}

#[test]
fn confidence_counts_positive_key_features() {
    let mut v = FeatureVector::new();
    assert_eq!(confidence(&v), Confidence::Low);
    v.insert(name::GLUCOSE_LATEST, 95.0);
    v.insert(name::AVG_SLEEP_HOURS, 7.0);
    assert_eq!(confidence(&v), Confidence::Low);
    v.insert(name::AVG_STRESS_LEVEL, 4.0);
    assert_eq!(confidence(&v), Confidence::Medium);
    v.insert(name::BP_SYSTOLIC_LATEST, 118.0);
    assert_eq!(confidence(&v), Confidence::High);
}

#[test]
fn report_sections_follow_features() {
    let mut v = defaults();
    v.insert(name::HAS_FAMILY_HYPERTENSION, 1.0);
    v.insert(name::SMOKING, 1.0);
    v.insert(name::GLUCOSE_LATEST, 110.0);
    v.insert(name::BP_SYSTOLIC_LATEST, 135.0);
    v.insert(name::CHOLESTEROL_LATEST, 190.0);

    let report = ScoringEngine::default()
        .generate_report(&scores(&[("diabetes", 0.72), ("hypertension", 0.4)]), &v, &user())
        .unwrap();

    let factors: Vec<&str> = report.key_risk_factors.iter().map(|k| k.factor.as_str()).collect();
    assert_eq!(factors, ["Genetic predisposition", "Sedentary lifestyle", "Smoking"]);
    assert_eq!(report.key_risk_factors[2].severity, RiskLevel::VeryHigh);
    assert!(!report.key_risk_factors[0].modifiable);

    let recs = &report.detailed_recommendations;
    assert_eq!(recs.medical, ["Schedule consultation with healthcare provider for diabetes"]);
    assert_eq!(
        recs.monitoring,
        ["Monitor blood glucose levels monthly", "Track blood pressure daily"]
    );
    assert_eq!(recs.prevention.len(), 2);
    // Default sleep is 7h, so only inactivity and diet show up.
    assert_eq!(recs.lifestyle.len(), 2);

    let expected: BTreeMap<String, f64> = [
        ("family_history".to_string(), 50.0),
        ("lab_data".to_string(), 100.0),
        ("lifestyle_data".to_string(), 66.67),
        ("mental_health".to_string(), 100.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(report.data_completeness, expected);
}

#[test]
fn reports_are_deterministic_apart_from_the_date() {
    let engine = ScoringEngine::default();
    let s = scores(&[("diabetes", 0.42), ("cardiac_risk", 0.61), ("mental_health", 0.1)]);
    let v = defaults();
    let at = Timestamp::from_second(1_768_000_000).unwrap();

    let first = engine.generate_report_at(&s, &v, &user(), at).unwrap();
    let second = engine.generate_report_at(&s, &v, &user(), at).unwrap();
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );

    let later = engine.generate_report(&s, &v, &user()).unwrap();
    let mut later = serde_json::to_value(&later).unwrap();
    let mut first = serde_json::to_value(&first).unwrap();
    later.as_object_mut().unwrap().remove("report_date");
    first.as_object_mut().unwrap().remove("report_date");
    assert_eq!(first, later);
}

#[test]
fn empty_or_invalid_scores_are_errors() {
    let engine = ScoringEngine::default();
    assert!(matches!(
        engine.generate_report(&RiskScores::new(), &defaults(), &user()),
        Err(ScoringError::NoScores)
    ));
    assert!(matches!(
        engine.generate_report(&scores(&[("diabetes", 1.2)]), &defaults(), &user()),
        Err(ScoringError::InvalidProbability { .. })
    ));
    assert!(matches!(
        engine.generate_report(&scores(&[("diabetes", f64::NAN)]), &defaults(), &user()),
        Err(ScoringError::InvalidProbability { .. })
    ));
}

#[test]
fn thresholds_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thresholds.json");
    std::fs::write(&path, r#"{"diabetes": {"low": 0.2, "medium": 0.4, "high": 0.6}}"#).unwrap();

    let thresholds = RiskThresholds::load(&path).unwrap();
    assert_eq!(thresholds.level("diabetes", 0.6), RiskLevel::VeryHigh);
    assert_eq!(thresholds.level("hypertension", 0.6), RiskLevel::High);

    std::fs::write(&path, r#"{"diabetes": {"low": 0.6, "medium": 0.4, "high": 0.2}}"#).unwrap();
    assert!(matches!(
        RiskThresholds::load(&path),
        Err(ScoringError::InvalidThresholds { .. })
    ));
}
