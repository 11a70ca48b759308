use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use medrisk_core::models::disease::Disease;
use tracing::{info, warn};

use crate::artifact::ModelArtifact;
use crate::error::PredictError;

/// Immutable set of trained per-disease models, loaded once at startup and
/// handed to the predictor.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<Disease, Arc<ModelArtifact>>,
}

impl ModelRegistry {
    /// A registry with no trained models; every disease uses clinical rules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_artifacts(artifacts: impl IntoIterator<Item = (Disease, ModelArtifact)>) -> Self {
        ModelRegistry {
            models: artifacts
                .into_iter()
                .map(|(disease, artifact)| (disease, Arc::new(artifact)))
                .collect(),
        }
    }

    /// Load `<disease>_model.json` for each disease from `dir`.
    ///
    /// A missing file means the disease has no model. Unreadable or malformed
    /// files are logged and skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut models = BTreeMap::new();

        for disease in Disease::ALL {
            let path = artifact_path(dir, disease);
            if !path.exists() {
                continue;
            }
            match load_artifact(&path) {
                Ok(artifact) => {
                    info!(disease = %disease, path = %path.display(), "loaded model artifact");
                    models.insert(disease, Arc::new(artifact));
                }
                Err(e) => {
                    warn!(disease = %disease, path = %path.display(), error = %e, "skipping model artifact");
                }
            }
        }

        ModelRegistry { models }
    }

    pub fn get(&self, disease: Disease) -> Option<Arc<ModelArtifact>> {
        self.models.get(&disease).cloned()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

pub fn artifact_path(dir: &Path, disease: Disease) -> PathBuf {
    dir.join(format!("{}_model.json", disease.as_str()))
}

pub fn load_artifact(path: &Path) -> Result<ModelArtifact, PredictError> {
    let bytes = std::fs::read(path).map_err(|source| PredictError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
