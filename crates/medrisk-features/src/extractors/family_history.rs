use medrisk_core::features::{flag, name, schema, FeatureVector};
use medrisk_core::records::HealthRecordSet;

use crate::CategoryExtractor;

/// Condition key, relative-count feature, has-history flag, and the weight
/// the condition carries in the genetic risk score.
const CONDITIONS: &[(&str, &str, &str, f64)] = &[
    ("diabetes", name::FAMILY_DIABETES, name::HAS_FAMILY_DIABETES, 2.0),
    ("hypertension", name::FAMILY_HYPERTENSION, name::HAS_FAMILY_HYPERTENSION, 1.5),
    ("heart_disease", name::FAMILY_HEART_DISEASE, name::HAS_FAMILY_HEART_DISEASE, 2.0),
    ("liver_disease", name::FAMILY_LIVER_DISEASE, name::HAS_FAMILY_LIVER_DISEASE, 1.5),
    ("mental_health", name::FAMILY_MENTAL_HEALTH, name::HAS_FAMILY_MENTAL_HEALTH, 1.0),
];

/// Family history: relatives per condition and a weighted genetic score.
pub struct FamilyHistoryExtractor;

impl CategoryExtractor for FamilyHistoryExtractor {
    fn id(&self) -> &str {
        "family_history"
    }

    fn feature_names(&self) -> &'static [&'static str] {
        schema::FAMILY_HISTORY
    }

    fn defaults(&self) -> FeatureVector {
        schema::FAMILY_HISTORY.iter().map(|n| (*n, 0.0)).collect()
    }

    fn has_data(&self, records: &HealthRecordSet) -> bool {
        records
            .family_history
            .as_ref()
            .is_some_and(|h| !h.conditions.is_empty())
    }

    fn extract(&self, records: &HealthRecordSet) -> FeatureVector {
        let mut v = FeatureVector::new();
        let Some(history) = records.family_history.as_ref() else {
            return v;
        };

        let mut genetic_risk = 0.0;
        for (condition, count_feature, has_feature, weight) in CONDITIONS {
            let relatives = history.relatives(condition) as f64;
            v.insert(count_feature, relatives);
            v.insert(has_feature, flag(relatives > 0.0));
            genetic_risk += relatives * weight;
        }
        v.insert(name::GENETIC_RISK_SCORE, genetic_risk);

        v
    }
}
