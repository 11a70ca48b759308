use medrisk_core::records::{HealthRecordSet, LabPanel, RecordCategory};
use serde_json::json;

#[test]
fn from_raw_parses_every_category() {
    let raw = json!({
        "lab_data": [
            {
                "test_date": "2026-01-10",
                "glucose": 110,
                "liver_enzymes": {"alt": 35, "ast": 28},
                "kidney_function": {"creatinine": 0.9, "bun": 15}
            }
        ],
        "lifestyle_data": [
            {"date": "2026-01-10", "sleep_hours": 6.5, "smoking": false,
             "meals": {"breakfast": true, "lunch": true, "dinner": false}}
        ],
        "mental_health_data": [
            {"date": "2026-01-10", "stress_level": 6, "mood": "neutral"}
        ],
        "family_history": {
            "diabetes": ["father", "grandmother"],
            "notes": "Father diagnosed at 45",
            "updated_at": "2026-01-01T00:00:00Z"
        }
    });

    let set = HealthRecordSet::from_raw(&raw);
    assert_eq!(set.lab_data.len(), 1);
    assert_eq!(set.lifestyle_data.len(), 1);
    assert_eq!(set.mental_health_data.len(), 1);

    let history = set.family_history.expect("family history parsed");
    assert_eq!(history.relatives("diabetes"), 2);
    assert_eq!(history.relatives("hypertension"), 0);
    assert_eq!(history.notes.as_deref(), Some("Father diagnosed at 45"));
    assert_eq!(set.lifestyle_data[0].meals.as_ref().map(|m| m.main_meals()), Some(2));
}

#[test]
fn malformed_records_are_dropped_individually() {
    let raw = json!({
        "lab_data": [
            {"test_date": "2026-01-10", "glucose": 95},
            {"test_date": "2026-01-01", "glucose": "high"},
            {"test_date": "2025-12-01", "glucose": 90}
        ]
    });

    let set = HealthRecordSet::from_raw(&raw);
    assert_eq!(set.lab_data.len(), 2);
    assert_eq!(set.lab_data[0].glucose, Some(95.0));
    assert_eq!(set.lab_data[1].glucose, Some(90.0));
}

#[test]
fn non_list_category_becomes_empty() {
    let raw = json!({"lab_data": {"glucose": 100}, "lifestyle_data": null});
    let set = HealthRecordSet::from_raw(&raw);
    assert!(set.lab_data.is_empty());
    assert!(set.lifestyle_data.is_empty());
    assert!(set.is_empty());
}

#[test]
fn empty_family_history_does_not_count_as_data() {
    let raw = json!({"family_history": {}});
    assert!(HealthRecordSet::from_raw(&raw).is_empty());

    let raw = json!({"family_history": {"hypertension": ["mother"]}});
    assert!(!HealthRecordSet::from_raw(&raw).is_empty());
}

#[test]
fn lab_panel_flattens_sub_panels() {
    let raw = json!({
        "lab_data": [{"liver_enzymes": {"alt": 41}, "kidney_function": {"bun": 20}}]
    });
    let set = HealthRecordSet::from_raw(&raw);
    let panel = LabPanel::from(&set.lab_data[0]);
    assert_eq!(panel.alt, Some(41.0));
    assert_eq!(panel.ast, None);
    assert_eq!(panel.bun, Some(20.0));
    assert_eq!(panel.creatinine, None);
}

#[test]
fn category_parses_from_key_or_slug() {
    assert_eq!("lab".parse::<RecordCategory>().ok(), Some(RecordCategory::LabData));
    assert_eq!(
        "mental-health".parse::<RecordCategory>().ok(),
        Some(RecordCategory::MentalHealthData)
    );
    assert_eq!(
        "lifestyle_data".parse::<RecordCategory>().ok(),
        Some(RecordCategory::LifestyleData)
    );
    assert!("vitals".parse::<RecordCategory>().is_err());
}
