//! Categorical vocabularies used by lifestyle and mental-health logs.
//!
//! Each vocabulary is an ordered list of accepted values paired with the
//! ordinal code the feature engineer averages. Lookups are exact matches on
//! the lowercase wire value.

pub const SLEEP_QUALITY: &[(&str, f64)] = &[
    ("poor", 1.0),
    ("fair", 2.0),
    ("good", 3.0),
    ("excellent", 4.0),
];

pub const DIET_QUALITY: &[(&str, f64)] = &[
    ("poor", 1.0),
    ("fair", 2.0),
    ("balanced", 3.0),
    ("excellent", 4.0),
];

pub const MOOD: &[(&str, f64)] = &[
    ("depressed", 1.0),
    ("low", 2.0),
    ("neutral", 3.0),
    ("good", 4.0),
    ("excellent", 5.0),
];

pub const SOCIAL_INTERACTION: &[(&str, f64)] = &[("low", 1.0), ("moderate", 2.0), ("high", 3.0)];

pub const WORK_LIFE_BALANCE: &[(&str, f64)] = &[
    ("poor", 1.0),
    ("fair", 2.0),
    ("good", 3.0),
    ("excellent", 4.0),
];

/// Moods counted towards the low-mood frequency.
pub const LOW_MOODS: &[&str] = &["depressed", "low"];

/// Ordinal code for `value` in `vocabulary`, or `None` if it is not a member.
pub fn ordinal(vocabulary: &[(&str, f64)], value: &str) -> Option<f64> {
    vocabulary
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, code)| *code)
}

/// The accepted values of a vocabulary, in ordinal order.
pub fn values(vocabulary: &[(&'static str, f64)]) -> Vec<&'static str> {
    vocabulary.iter().map(|(name, _)| *name).collect()
}
