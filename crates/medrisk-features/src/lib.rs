//! medrisk-features
//!
//! Feature engineering for health records. Pure computation, no I/O.
//! Each record category has an extractor that knows its slice of the
//! feature schema, its documented defaults, and how to aggregate records
//! into values.

pub mod engineer;
pub mod extractors;
pub mod stats;
pub mod trends;

use medrisk_core::features::FeatureVector;
use medrisk_core::records::HealthRecordSet;
use tracing::debug;

pub use engineer::FeatureEngineer;

/// Trait implemented by each record-category feature extractor.
pub trait CategoryExtractor: Send + Sync {
    /// Category identifier (e.g., "lab_data", "family_history").
    fn id(&self) -> &str;

    /// The schema keys this extractor produces.
    fn feature_names(&self) -> &'static [&'static str];

    /// The documented sub-vector used when the category holds no data.
    fn defaults(&self) -> FeatureVector;

    /// Whether `records` carries anything for this category.
    fn has_data(&self, records: &HealthRecordSet) -> bool;

    /// Aggregate the category's records. Only called when [`has_data`] is true.
    ///
    /// [`has_data`]: CategoryExtractor::has_data
    fn extract(&self, records: &HealthRecordSet) -> FeatureVector;

    /// The category's complete sub-vector: defaults when there is no data,
    /// otherwise extracted values with any schema gap filled from defaults.
    fn features(&self, records: &HealthRecordSet) -> FeatureVector {
        let defaults = self.defaults();
        if !self.has_data(records) {
            debug!(category = self.id(), "no records, using default features");
            return defaults;
        }

        let mut vector = self.extract(records);
        for (name, value) in defaults.iter() {
            if vector.get(name).is_none() {
                vector.insert(name, value);
            }
        }
        vector
    }
}

/// Return all registered extractors, in schema order.
pub fn all_extractors() -> Vec<Box<dyn CategoryExtractor>> {
    vec![
        Box::new(extractors::lab::LabExtractor),
        Box::new(extractors::lifestyle::LifestyleExtractor),
        Box::new(extractors::mental_health::MentalHealthExtractor),
        Box::new(extractors::family_history::FamilyHistoryExtractor),
    ]
}

/// Look up an extractor by category ID.
pub fn get_extractor(id: &str) -> Option<Box<dyn CategoryExtractor>> {
    all_extractors().into_iter().find(|e| e.id() == id)
}
