//! Inference pipeline: reorder, standardize, classify

use crate::error::{NumericError, PredictorError, PredictorResult};
use crate::feature_encoder::{EncodedFeatureVector, FeatureEncoder};
use crate::models::loader::ArtifactBundle;
use crate::types::application::RawApplication;
use crate::types::decision::LoanDecision;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Result of model inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Whether the positive (repayment) class was predicted
    pub approved: bool,
    /// Positive-class probability (0.0 - 1.0)
    pub probability_of_repayment: f64,
}

impl PredictionResult {
    /// Class label as the classifier reports it
    pub fn label(&self) -> u8 {
        u8::from(self.approved)
    }

    /// Render the prediction as a decision for the caller
    pub fn to_decision(&self) -> LoanDecision {
        LoanDecision::new(self)
    }
}

/// Score one encoded application against the bundle.
///
/// The row is laid out in manifest order, standardized and passed to the
/// classifier. A zero scale surfaces as `DegenerateScaler`; any other
/// numeric failure as `InferenceFailed`.
pub fn predict(
    encoded: &EncodedFeatureVector,
    bundle: &ArtifactBundle,
) -> PredictorResult<PredictionResult> {
    let row = encoded.reorder(bundle.columns())?;

    let scaled = bundle
        .scaler()
        .transform(&row)
        .map_err(|e| scoring_error(e, bundle))?;

    let (label, probability) = bundle
        .classifier()
        .predict(&scaled)
        .map_err(|e| scoring_error(e, bundle))?;

    debug!(
        label = label,
        probability = probability,
        scaled = ?scaled,
        "Prediction complete"
    );

    Ok(PredictionResult {
        approved: label == 1,
        probability_of_repayment: probability,
    })
}

fn scoring_error(err: NumericError, bundle: &ArtifactBundle) -> PredictorError {
    match err {
        NumericError::ZeroScale { index } => PredictorError::DegenerateScaler {
            feature: bundle
                .columns()
                .names()
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{index}")),
            index,
        },
        other => PredictorError::InferenceFailed { source: other },
    }
}

/// Inference engine bound to one loaded artifact bundle
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    bundle: Arc<ArtifactBundle>,
    encoder: FeatureEncoder,
}

impl InferenceEngine {
    /// Create an engine over a loaded bundle
    pub fn new(bundle: Arc<ArtifactBundle>) -> Self {
        Self {
            bundle,
            encoder: FeatureEncoder::new(),
        }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Encode an application against the bundle's manifest
    pub fn encode(&self, raw: &RawApplication) -> PredictorResult<EncodedFeatureVector> {
        self.encoder.encode(raw, self.bundle.columns())
    }

    /// Score an already-encoded row
    pub fn predict(&self, encoded: &EncodedFeatureVector) -> PredictorResult<PredictionResult> {
        predict(encoded, &self.bundle)
    }

    /// Encode and score one application
    pub fn evaluate(&self, raw: &RawApplication) -> PredictorResult<PredictionResult> {
        let encoded = self.encode(raw)?;
        self.predict(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_encoder::FEATURE_NAMES;
    use crate::models::classifier::LogisticRegression;
    use crate::models::columns::ColumnManifest;
    use crate::models::scaler::StandardScaler;
    use crate::types::application::{Education, PropertyArea};

    fn identity_bundle(weights: Vec<f64>, bias: f64) -> ArtifactBundle {
        let columns =
            ColumnManifest::new(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()).unwrap();
        ArtifactBundle::new(
            LogisticRegression::new(weights, bias),
            StandardScaler::new(vec![0.0; 7], vec![1.0; 7]),
            columns,
        )
        .unwrap()
    }

    #[test]
    fn test_prediction_result() {
        let result = PredictionResult {
            approved: true,
            probability_of_repayment: 0.78,
        };

        assert_eq!(result.label(), 1);
        assert!(result.to_decision().approved);
    }

    #[test]
    fn test_credit_history_drives_score() {
        let bundle = Arc::new(identity_bundle(
            vec![3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            -1.5,
        ));
        let engine = InferenceEngine::new(bundle);

        let mut app = RawApplication::default();
        let without = engine.evaluate(&app).unwrap();
        app.credit_history = true;
        let with = engine.evaluate(&app).unwrap();

        assert!(!without.approved);
        assert!(with.approved);
        assert!(with.probability_of_repayment > without.probability_of_repayment);
    }

    #[test]
    fn test_probability_matches_manual_computation() {
        let bundle = identity_bundle(vec![0.5, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0], 0.1);
        let app = RawApplication::new(
            false,
            Education::Graduate,
            true,
            0.0,
            0.0,
            0.0,
            PropertyArea::SemiUrban,
        );

        let encoded = FeatureEncoder::new().encode_unchecked(&app);
        let result = predict(&encoded, &bundle).unwrap();

        let z: f64 = 0.1 + 0.5 + 0.25;
        let expected = 1.0 / (1.0 + (-z).exp());
        assert_eq!(result.probability_of_repayment, expected);
        assert!(result.approved);
    }

    #[test]
    fn test_non_finite_input_is_inference_failure() {
        let bundle = identity_bundle(vec![0.1; 7], 0.0);
        let mut app = RawApplication::default();
        app.applicant_income = f64::INFINITY;

        let encoded = FeatureEncoder::new().encode_unchecked(&app);
        let err = predict(&encoded, &bundle).unwrap_err();
        assert_eq!(err.kind(), "inference_failed");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_foreign_manifest_is_schema_mismatch() {
        let columns = ColumnManifest::new(
            [
                "Gender",
                "Married",
                "Education",
                "Credit_History",
                "Loan_Amount",
                "Applicant_Income",
                "Coapplicant_Income",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
        .unwrap();
        let bundle = ArtifactBundle::new(
            LogisticRegression::new(vec![0.1; 7], 0.0),
            StandardScaler::new(vec![0.0; 7], vec![1.0; 7]),
            columns,
        )
        .unwrap();
        let engine = InferenceEngine::new(Arc::new(bundle));

        let err = engine.evaluate(&RawApplication::default()).unwrap_err();
        assert_eq!(err.kind(), "schema_mismatch");
    }
}
