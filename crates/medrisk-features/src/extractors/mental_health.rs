use medrisk_core::features::{flag, name, schema, FeatureVector};
use medrisk_core::records::{HealthRecordSet, MentalHealthRecord};
use medrisk_core::vocab;

use crate::stats::{fraction, mean};
use crate::CategoryExtractor;

const DEFAULT_STRESS: f64 = 5.0;
const DEFAULT_ANXIETY: f64 = 3.0;
const DEFAULT_MOOD: f64 = 3.0;
const DEFAULT_SOCIAL: f64 = 2.0;
const DEFAULT_BALANCE: f64 = 2.5;

const HIGH_STRESS: f64 = 7.0;
const LOW_MOOD_MAJORITY: f64 = 0.5;

/// Mental-health check-ins: averaged scales and threshold frequencies.
pub struct MentalHealthExtractor;

impl CategoryExtractor for MentalHealthExtractor {
    fn id(&self) -> &str {
        "mental_health_data"
    }

    fn feature_names(&self) -> &'static [&'static str] {
        schema::MENTAL_HEALTH
    }

    fn defaults(&self) -> FeatureVector {
        [
            (name::AVG_STRESS_LEVEL, DEFAULT_STRESS),
            (name::AVG_ANXIETY_LEVEL, DEFAULT_ANXIETY),
            (name::HIGH_STRESS_FREQUENCY, 0.0),
            (name::AVG_MOOD_SCORE, DEFAULT_MOOD),
            (name::LOW_MOOD_FREQUENCY, 0.0),
            (name::SOCIAL_INTERACTION_SCORE, DEFAULT_SOCIAL),
            (name::WORK_LIFE_BALANCE_SCORE, DEFAULT_BALANCE),
            (name::CHRONIC_STRESS_FLAG, 0.0),
            (name::DEPRESSION_RISK_FLAG, 0.0),
        ]
        .into_iter()
        .collect()
    }

    fn has_data(&self, records: &HealthRecordSet) -> bool {
        !records.mental_health_data.is_empty()
    }

    fn extract(&self, records: &HealthRecordSet) -> FeatureVector {
        let checkins = &records.mental_health_data;
        let total = checkins.len();
        let mut v = FeatureVector::new();

        let stress: Vec<f64> = checkins.iter().filter_map(|r| r.stress_level).collect();
        let avg_stress = mean(&stress).unwrap_or(DEFAULT_STRESS);
        v.insert(name::AVG_STRESS_LEVEL, avg_stress);

        let anxiety: Vec<f64> = checkins.iter().filter_map(|r| r.anxiety_level).collect();
        v.insert(
            name::AVG_ANXIETY_LEVEL,
            mean(&anxiety).unwrap_or(DEFAULT_ANXIETY),
        );

        let high_stress = stress.iter().filter(|s| **s >= HIGH_STRESS).count();
        v.insert(name::HIGH_STRESS_FREQUENCY, fraction(high_stress, total));

        v.insert(
            name::AVG_MOOD_SCORE,
            ordinal_mean(checkins, |r| r.mood.as_deref(), vocab::MOOD, DEFAULT_MOOD),
        );
        let low_mood = checkins
            .iter()
            .filter(|r| r.mood.as_deref().is_some_and(|m| vocab::LOW_MOODS.contains(&m)))
            .count();
        let low_mood_frequency = fraction(low_mood, total);
        v.insert(name::LOW_MOOD_FREQUENCY, low_mood_frequency);

        v.insert(
            name::SOCIAL_INTERACTION_SCORE,
            ordinal_mean(
                checkins,
                |r| r.social_interaction.as_deref(),
                vocab::SOCIAL_INTERACTION,
                DEFAULT_SOCIAL,
            ),
        );
        v.insert(
            name::WORK_LIFE_BALANCE_SCORE,
            ordinal_mean(
                checkins,
                |r| r.work_life_balance.as_deref(),
                vocab::WORK_LIFE_BALANCE,
                DEFAULT_BALANCE,
            ),
        );

        v.insert(name::CHRONIC_STRESS_FLAG, flag(avg_stress >= HIGH_STRESS));
        v.insert(
            name::DEPRESSION_RISK_FLAG,
            flag(low_mood_frequency > LOW_MOOD_MAJORITY),
        );

        v
    }
}

fn ordinal_mean(
    checkins: &[MentalHealthRecord],
    field: fn(&MentalHealthRecord) -> Option<&str>,
    vocabulary: &[(&str, f64)],
    default: f64,
) -> f64 {
    let codes: Vec<f64> = checkins
        .iter()
        .filter_map(field)
        .filter_map(|value| vocab::ordinal(vocabulary, value))
        .collect();
    mean(&codes).unwrap_or(default)
}
