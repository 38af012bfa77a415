//! Fitted model artifacts and the inference pipeline

pub mod classifier;
pub mod columns;
pub mod inference;
pub mod loader;
pub mod runtime;
pub mod scaler;

pub use classifier::LogisticRegression;
pub use columns::ColumnManifest;
pub use inference::{predict, InferenceEngine, PredictionResult};
pub use loader::{load_artifacts, ArtifactBundle, ArtifactLoader};
pub use runtime::ArtifactCache;
pub use scaler::StandardScaler;
