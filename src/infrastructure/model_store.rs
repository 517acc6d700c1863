use crate::application::demand::model::{DemandForest, DemandModel};
use crate::domain::demand::vocabulary::LocationVocabulary;
use crate::domain::errors::ModelStoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Artifact layout version. Bump when the on-disk shape changes so older
/// binaries refuse newer artifacts instead of misreading them.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtifactView<'a> {
    version: u32,
    vocabulary: &'a LocationVocabulary,
    forest: &'a DemandForest,
}

#[derive(Deserialize)]
struct Artifact {
    #[allow(dead_code)]
    version: u32,
    vocabulary: LocationVocabulary,
    forest: DemandForest,
}

/// Probed before the full decode so an unknown layout reports as a version
/// problem rather than a parse failure.
#[derive(Deserialize)]
struct ArtifactHeader {
    version: u32,
}

/// Persists a trained model and its vocabulary as one JSON artifact.
///
/// Writes go through a temp file and a rename, so a crash mid-save leaves
/// either the previous artifact or none, never a truncated one. A fixed
/// seed and an unchanged dataset reproduce the artifact byte for byte.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, model: &DemandModel) -> Result<(), ModelStoreError> {
        let artifact = ArtifactView {
            version: FORMAT_VERSION,
            vocabulary: model.vocabulary(),
            forest: model.forest(),
        };
        let content =
            serde_json::to_string(&artifact).map_err(|e| ModelStoreError::Encode {
                reason: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Atomic write: write to a temp file then rename. The temp name is
        // unique per write so two writers targeting the same artifact never
        // clobber or promote each other's half of a save.
        static TMP_SEQ: AtomicU64 = AtomicU64::new(0);
        let temp_path = self.path.with_extension(format!(
            "tmp-{}-{}",
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!("Saved demand model artifact to {:?}", self.path);
        Ok(())
    }

    pub fn load(&self) -> Result<DemandModel, ModelStoreError> {
        if !self.path.exists() {
            return Err(ModelStoreError::NotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read(&self.path)?;

        let header: ArtifactHeader =
            serde_json::from_slice(&content).map_err(|e| ModelStoreError::Corrupt {
                reason: e.to_string(),
            })?;
        if header.version != FORMAT_VERSION {
            return Err(ModelStoreError::VersionMismatch {
                found: header.version,
                expected: FORMAT_VERSION,
            });
        }

        let artifact: Artifact =
            serde_json::from_slice(&content).map_err(|e| ModelStoreError::Corrupt {
                reason: e.to_string(),
            })?;

        info!("Loaded demand model artifact from {:?}", self.path);
        Ok(DemandModel::from_parts(artifact.forest, artifact.vocabulary))
    }
}
