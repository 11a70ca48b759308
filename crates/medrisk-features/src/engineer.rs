use medrisk_core::features::FeatureVector;
use medrisk_core::records::HealthRecordSet;
use tracing::info;

use crate::{all_extractors, CategoryExtractor};

/// Turns a user's record set into one fixed-schema [`FeatureVector`].
///
/// Never fails: a category without usable records contributes its documented
/// default sub-vector.
pub struct FeatureEngineer {
    extractors: Vec<Box<dyn CategoryExtractor>>,
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEngineer {
    pub fn new() -> Self {
        FeatureEngineer {
            extractors: all_extractors(),
        }
    }

    pub fn engineer(&self, records: &HealthRecordSet) -> FeatureVector {
        let mut vector = FeatureVector::new();
        for extractor in &self.extractors {
            vector.merge(extractor.features(records));
        }
        info!(features = vector.len(), "engineered feature vector");
        vector
    }

    /// The documented defaults for every category, i.e. the vector produced
    /// for a user with no data at all.
    pub fn default_vector(&self) -> FeatureVector {
        let mut vector = FeatureVector::new();
        for extractor in &self.extractors {
            vector.merge(extractor.defaults());
        }
        vector
    }
}

/// Engineer features with the standard extractor set.
pub fn engineer(records: &HealthRecordSet) -> FeatureVector {
    FeatureEngineer::new().engineer(records)
}
