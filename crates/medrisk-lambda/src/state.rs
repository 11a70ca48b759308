use std::path::PathBuf;
use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use medrisk_predictor::multi_output::MultiOutputModel;
use medrisk_predictor::{DiseaseRiskPredictor, ModelRegistry, PredictError};
use medrisk_scoring::{RiskAssessor, RiskThresholds, ScoringEngine, ScoringError};
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bucket: String,
    pub assessor: RiskAssessor,
    multi_output_path: Arc<PathBuf>,
    multi_output: Arc<OnceCell<MultiOutputModel>>,
}

impl AppState {
    pub fn new(s3: S3Client, bucket: String, assessor: RiskAssessor, multi_output_path: PathBuf) -> Self {
        AppState {
            s3,
            bucket,
            assessor,
            multi_output_path: Arc::new(multi_output_path),
            multi_output: Arc::new(OnceCell::new()),
        }
    }

    /// Load the per-disease artifacts and thresholds named by `config`.
    /// Missing or invalid artifacts leave those diseases on the rule fallback.
    pub fn from_config(s3: S3Client, config: &Config) -> Result<Self, ScoringError> {
        let registry = ModelRegistry::load_dir(&config.model_dir);
        let thresholds = match &config.thresholds {
            Some(path) => RiskThresholds::load(path)?,
            None => RiskThresholds::default(),
        };
        info!(
            models = registry.len(),
            custom_thresholds = config.thresholds.is_some(),
            "risk pipeline ready"
        );

        let assessor = RiskAssessor::new(
            DiseaseRiskPredictor::new(&registry),
            ScoringEngine::new(thresholds),
        );
        Ok(Self::new(
            s3,
            config.bucket.clone(),
            assessor,
            config.multi_output_model.clone(),
        ))
    }

    /// The multi-output model, loaded on first use. A failed load is retried
    /// on the next call.
    pub async fn multi_output_model(&self) -> Result<&MultiOutputModel, PredictError> {
        self.multi_output
            .get_or_try_init(|| async { MultiOutputModel::load(&self.multi_output_path) })
            .await
    }
}
