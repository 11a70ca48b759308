use std::env;
use std::path::PathBuf;

const DEFAULT_BUCKET: &str = "medrisk";
const DEFAULT_MODEL_DIR: &str = "/opt/models";
const DEFAULT_MULTI_OUTPUT_MODEL: &str = "/opt/models/multi_output_model.json";

/// Service settings, read once at cold start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bucket: String,
    pub model_dir: PathBuf,
    pub multi_output_model: PathBuf,
    /// Optional JSON file overriding the default risk cut points.
    pub thresholds: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Config {
            bucket: var("MEDRISK_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            model_dir: var("MEDRISK_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR)),
            multi_output_model: var("MEDRISK_MULTI_OUTPUT_MODEL")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MULTI_OUTPUT_MODEL)),
            thresholds: var("MEDRISK_THRESHOLDS").map(PathBuf::from),
        }
    }
}
