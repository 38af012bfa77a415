//! Loan Approval Predictor Library
//!
//! Scores a single loan application against a pre-fitted logistic
//! regression and standard scaler, returning an approval decision and the
//! probability of repayment.

pub mod config;
pub mod error;
pub mod feature_encoder;
pub mod metrics;
pub mod models;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{PredictorError, PredictorResult};
pub use feature_encoder::{EncodedFeatureVector, FeatureEncoder};
pub use models::inference::{InferenceEngine, PredictionResult};
pub use models::loader::{load_artifacts, ArtifactBundle, ArtifactLoader};
pub use models::runtime::ArtifactCache;
pub use session::{handle_request, run_session, RequestError, SessionError};
pub use types::{application::RawApplication, decision::LoanDecision};
