use medrisk_core::features::{name, schema};
use medrisk_core::records::HealthRecordSet;
use medrisk_features::{all_extractors, get_extractor, FeatureEngineer};
use serde_json::json;

#[test]
fn empty_records_produce_documented_defaults() {
    let engineer = FeatureEngineer::new();
    let vector = engineer.engineer(&HealthRecordSet::default());

    assert!(vector.is_complete());
    assert_eq!(vector.len(), schema::len());
    assert_eq!(vector, engineer.default_vector());

    assert_eq!(vector.get(name::GLUCOSE_LATEST), Some(0.0));
    assert_eq!(vector.get(name::AVG_SLEEP_HOURS), Some(7.0));
    assert_eq!(vector.get(name::SLEEP_CONSISTENCY), Some(0.5));
    assert_eq!(vector.get(name::AVG_STEPS), Some(5000.0));
    assert_eq!(vector.get(name::AVG_WATER_INTAKE), Some(2000.0));
    assert_eq!(vector.get(name::DIET_QUALITY_SCORE), Some(2.5));
    assert_eq!(vector.get(name::MEAL_REGULARITY), Some(0.8));
    assert_eq!(vector.get(name::SEDENTARY_LIFESTYLE), Some(1.0));
    assert_eq!(vector.get(name::AVG_STRESS_LEVEL), Some(5.0));
    assert_eq!(vector.get(name::AVG_ANXIETY_LEVEL), Some(3.0));
    assert_eq!(vector.get(name::AVG_MOOD_SCORE), Some(3.0));
    assert_eq!(vector.get(name::SOCIAL_INTERACTION_SCORE), Some(2.0));
    assert_eq!(vector.get(name::WORK_LIFE_BALANCE_SCORE), Some(2.5));
    assert_eq!(vector.get(name::GENETIC_RISK_SCORE), Some(0.0));
}

#[test]
fn schema_is_complete_for_any_subset_of_categories() {
    let lab = json!([{"test_date": "2026-01-10", "glucose": 105}]);
    let lifestyle = json!([{"date": "2026-01-10", "sleep_hours": 6}]);
    let mental = json!([{"date": "2026-01-10", "stress_level": 4}]);
    let family = json!({"hypertension": ["mother"]});

    let engineer = FeatureEngineer::new();
    for mask in 0u8..16 {
        let mut raw = serde_json::Map::new();
        if mask & 1 != 0 {
            raw.insert("lab_data".into(), lab.clone());
        }
        if mask & 2 != 0 {
            raw.insert("lifestyle_data".into(), lifestyle.clone());
        }
        if mask & 4 != 0 {
            raw.insert("mental_health_data".into(), mental.clone());
        }
        if mask & 8 != 0 {
            raw.insert("family_history".into(), family.clone());
        }

        let set = HealthRecordSet::from_raw(&serde_json::Value::Object(raw));
        let vector = engineer.engineer(&set);
        assert!(vector.missing_keys().is_empty(), "mask {mask}: {:?}", vector.missing_keys());
        assert!(vector.iter().all(|(_, v)| v.is_finite()), "mask {mask}");
    }
}

#[test]
fn extractor_registry_covers_every_category_once() {
    let ids: Vec<String> = all_extractors().iter().map(|e| e.id().to_string()).collect();
    assert_eq!(
        ids,
        ["lab_data", "lifestyle_data", "mental_health_data", "family_history"]
    );

    let total: usize = all_extractors().iter().map(|e| e.feature_names().len()).sum();
    assert_eq!(total, schema::len());

    assert!(get_extractor("lifestyle_data").is_some());
    assert!(get_extractor("wearables").is_none());
}
