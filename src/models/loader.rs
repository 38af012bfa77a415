//! Artifact loader for the fitted classifier, scaler and column manifest

use crate::config::ArtifactsConfig;
use crate::error::{PredictorError, PredictorResult};
use crate::feature_encoder::FEATURE_NAMES;
use crate::models::classifier::LogisticRegression;
use crate::models::columns::ColumnManifest;
use crate::models::scaler::StandardScaler;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File names of the three artifacts inside a model directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFiles {
    pub classifier: String,
    pub scaler: String,
    pub columns: String,
}

impl ArtifactFiles {
    fn all(&self) -> [&str; 3] {
        [&self.classifier, &self.scaler, &self.columns]
    }
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            classifier: "LogisticRegression.json".to_string(),
            scaler: "StandardScaler.json".to_string(),
            columns: "columns.json".to_string(),
        }
    }
}

/// Immutable classifier, scaler and manifest loaded from one directory.
///
/// All three agree on dimensionality and feature identity; a bundle that
/// exists has passed those checks.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    classifier: LogisticRegression,
    scaler: StandardScaler,
    columns: ColumnManifest,
    source_dir: Option<PathBuf>,
}

impl ArtifactBundle {
    /// Assemble a bundle from already-deserialized parts.
    ///
    /// Only the parts' agreement with each other is checked. Artifacts read
    /// by [`ArtifactLoader`] must also match the encoder's feature layout.
    pub fn new(
        classifier: LogisticRegression,
        scaler: StandardScaler,
        columns: ColumnManifest,
    ) -> PredictorResult<Self> {
        let files = ArtifactFiles::default();
        Self::assemble(
            classifier,
            scaler,
            columns,
            Path::new(&files.classifier),
            Path::new(&files.scaler),
            None,
        )
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn columns(&self) -> &ColumnManifest {
        &self.columns
    }

    /// Directory the artifacts were read from, if they came from disk.
    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn dimension(&self) -> usize {
        self.columns.len()
    }

    fn assemble(
        classifier: LogisticRegression,
        scaler: StandardScaler,
        columns: ColumnManifest,
        classifier_path: &Path,
        scaler_path: &Path,
        source_dir: Option<PathBuf>,
    ) -> PredictorResult<Self> {
        classifier
            .check_shape()
            .map_err(|reason| PredictorError::corrupt(classifier_path, reason))?;
        scaler
            .check_shape()
            .map_err(|reason| PredictorError::corrupt(scaler_path, reason))?;

        let width = columns.len();
        if scaler.n_features() != width {
            return Err(PredictorError::corrupt(
                scaler_path,
                format!(
                    "scaler is fitted on {} features but the manifest lists {width}",
                    scaler.n_features()
                ),
            ));
        }
        if classifier.n_features() != width {
            return Err(PredictorError::corrupt(
                classifier_path,
                format!(
                    "classifier has {} coefficients but the manifest lists {width} columns",
                    classifier.n_features()
                ),
            ));
        }
        if let Some(names) = scaler.feature_names() {
            if names != columns.names() {
                return Err(PredictorError::corrupt(
                    scaler_path,
                    "feature_names_in_ does not match the column manifest",
                ));
            }
        }
        if let Some(index) = scaler.degenerate_index() {
            return Err(PredictorError::DegenerateScaler {
                feature: columns.names()[index].clone(),
                index,
            });
        }

        Ok(Self {
            classifier,
            scaler,
            columns,
            source_dir,
        })
    }
}

/// Loader that resolves the artifact directory from an ordered candidate list
#[derive(Debug, Clone, Default)]
pub struct ArtifactLoader {
    files: ArtifactFiles,
}

impl ArtifactLoader {
    /// Create a loader with the default artifact file names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom artifact file names
    pub fn with_files(files: ArtifactFiles) -> Self {
        Self { files }
    }

    /// Create a loader from configuration
    pub fn from_config(config: &ArtifactsConfig) -> Self {
        Self::with_files(ArtifactFiles {
            classifier: config.classifier_file.clone(),
            scaler: config.scaler_file.clone(),
            columns: config.columns_file.clone(),
        })
    }

    pub fn files(&self) -> &ArtifactFiles {
        &self.files
    }

    /// Load the bundle from the first candidate directory holding all three files.
    ///
    /// A directory with any file missing is skipped. Once a complete
    /// directory is found, a parse or consistency failure there is final.
    pub fn load(&self, candidates: &[PathBuf]) -> PredictorResult<ArtifactBundle> {
        let mut missing: Vec<String> = Vec::new();

        for dir in candidates {
            debug!(dir = %dir.display(), "Checking artifact directory");

            let absent: Vec<&str> = self
                .files
                .all()
                .into_iter()
                .filter(|name| !dir.join(name).is_file())
                .collect();

            if absent.is_empty() {
                return self.load_from_dir(dir);
            }

            warn!(
                dir = %dir.display(),
                missing = ?absent,
                "Artifact directory incomplete, trying next candidate"
            );
            for name in absent {
                if !missing.iter().any(|m| m == name) {
                    missing.push(name.to_string());
                }
            }
        }

        Err(PredictorError::ArtifactNotFound {
            searched: candidates.to_vec(),
            missing,
        })
    }

    /// Load the bundle from one directory known to hold all three files
    pub fn load_from_dir(&self, dir: &Path) -> PredictorResult<ArtifactBundle> {
        let classifier_path = dir.join(&self.files.classifier);
        let scaler_path = dir.join(&self.files.scaler);
        let columns_path = dir.join(&self.files.columns);

        let classifier: LogisticRegression = read_json(&classifier_path)?;
        let scaler: StandardScaler = read_json(&scaler_path)?;
        let columns: ColumnManifest = read_json(&columns_path)?;

        let bundle = ArtifactBundle::assemble(
            classifier,
            scaler,
            columns,
            &classifier_path,
            &scaler_path,
            Some(dir.to_path_buf()),
        )?;
        check_feature_layout(&columns_path, bundle.columns())?;

        info!(
            dir = %dir.display(),
            features = bundle.dimension(),
            columns = ?bundle.columns().names(),
            "Model artifacts loaded"
        );

        Ok(bundle)
    }
}

/// Load the artifact bundle from an ordered list of candidate directories.
pub fn load_artifacts(candidates: &[PathBuf]) -> PredictorResult<ArtifactBundle> {
    ArtifactLoader::new().load(candidates)
}

/// The persisted manifest must name exactly the encoded features.
fn check_feature_layout(path: &Path, columns: &ColumnManifest) -> PredictorResult<()> {
    if columns.len() != FEATURE_NAMES.len() {
        return Err(PredictorError::corrupt(
            path,
            format!(
                "manifest lists {} columns but the encoder produces {}",
                columns.len(),
                FEATURE_NAMES.len()
            ),
        ));
    }
    if let Some(name) = columns.iter().find(|name| !FEATURE_NAMES.contains(name)) {
        return Err(PredictorError::corrupt(
            path,
            format!("manifest column {name:?} is not an encoded feature"),
        ));
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PredictorResult<T> {
    let bytes = fs::read(path).map_err(|e| PredictorError::corrupt(path, e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| PredictorError::corrupt(path, e.to_string()))
}
