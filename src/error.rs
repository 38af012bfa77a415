//! Error taxonomy for artifact loading, encoding and scoring.
//!
//! Startup errors (`ArtifactNotFound`, `ArtifactCorrupt`, `DegenerateScaler`)
//! are fatal: nothing may be served until the artifacts are fixed. Request
//! errors (`SchemaMismatch`, `InferenceFailed`) reject the one request and
//! leave the process running.

use std::path::{Path, PathBuf};

/// Result alias used across the core.
pub type PredictorResult<T> = Result<T, PredictorError>;

/// Errors raised by the artifact store, feature encoder and inference pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error(
        "model artifacts not found: missing {} after searching {}",
        .missing.join(", "),
        display_paths(.searched)
    )]
    ArtifactNotFound {
        searched: Vec<PathBuf>,
        missing: Vec<String>,
    },

    #[error("artifact {} is corrupt: {reason}", .path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error(
        "feature schema mismatch: expected {expected} columns, got {actual} \
         (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    SchemaMismatch {
        expected: usize,
        actual: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("scaler has a degenerate scale for feature {feature} (index {index})")]
    DegenerateScaler { feature: String, index: usize },

    #[error("inference failed: {source}")]
    InferenceFailed {
        #[source]
        source: NumericError,
    },
}

/// Numeric failures raised while scaling or scoring a row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    #[error("{stage} expects {expected} values, got {actual}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} produced a non-finite value {value} at index {index}")]
    NonFinite {
        stage: &'static str,
        index: usize,
        value: f64,
    },

    #[error("{stage} produced a non-finite score {value}")]
    NonFiniteScore { stage: &'static str, value: f64 },

    #[error("scale at index {index} is zero or non-finite")]
    ZeroScale { index: usize },
}

impl PredictorError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictorError::ArtifactNotFound { .. } => "artifact_not_found",
            PredictorError::ArtifactCorrupt { .. } => "artifact_corrupt",
            PredictorError::SchemaMismatch { .. } => "schema_mismatch",
            PredictorError::DegenerateScaler { .. } => "degenerate_scaler",
            PredictorError::InferenceFailed { .. } => "inference_failed",
        }
    }

    /// Whether the process must stop serving when this error occurs.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PredictorError::ArtifactNotFound { .. }
                | PredictorError::ArtifactCorrupt { .. }
                | PredictorError::DegenerateScaler { .. }
        )
    }

    /// Whether the error only rejects the current request.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }

    pub(crate) fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        PredictorError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl From<NumericError> for PredictorError {
    fn from(source: NumericError) -> Self {
        PredictorError::InferenceFailed { source }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no directories".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_classification() {
        let not_found = PredictorError::ArtifactNotFound {
            searched: vec![PathBuf::from("Model"), PathBuf::from("model")],
            missing: vec!["columns.json".to_string()],
        };
        assert!(not_found.is_fatal());
        assert_eq!(not_found.kind(), "artifact_not_found");

        let mismatch = PredictorError::SchemaMismatch {
            expected: 7,
            actual: 7,
            missing: vec!["Gender".to_string()],
            unexpected: vec!["Married".to_string()],
        };
        assert!(mismatch.is_recoverable());

        let degenerate = PredictorError::DegenerateScaler {
            feature: "Loan_Amount".to_string(),
            index: 6,
        };
        assert!(degenerate.is_fatal());
    }

    #[test]
    fn test_not_found_message_lists_paths() {
        let err = PredictorError::ArtifactNotFound {
            searched: vec![PathBuf::from("/srv/Model"), PathBuf::from("/srv/model")],
            missing: vec!["StandardScaler.json".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("/srv/Model"));
        assert!(message.contains("/srv/model"));
        assert!(message.contains("StandardScaler.json"));
    }

    #[test]
    fn test_inference_failed_keeps_cause() {
        let err: PredictorError = NumericError::NonFiniteScore {
            stage: "classifier",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err.kind(), "inference_failed");
        assert!(err.source().is_some());
    }
}
