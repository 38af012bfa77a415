//! Fitted binary logistic regression

use crate::error::NumericError;
use serde::{Deserialize, Serialize};

/// Probability at or above which the positive class is predicted.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Logistic function `1 / (1 + e^-z)`.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Binary logistic regression exported from its fitted attributes
/// (`classes_`, `coef_`, `intercept_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(rename = "classes_")]
    classes: Vec<i64>,
    #[serde(rename = "coef_")]
    coef: Vec<Vec<f64>>,
    #[serde(rename = "intercept_")]
    intercept: Vec<f64>,
}

impl LogisticRegression {
    /// Binary model over classes `[0, 1]`.
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            classes: vec![0, 1],
            coef: vec![weights],
            intercept: vec![bias],
        }
    }

    /// Check that the exported attributes describe a single binary model.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.classes.len() != 2 {
            return Err(format!(
                "expected a binary classifier, classes_ has {} entries",
                self.classes.len()
            ));
        }
        if self.classes != [0, 1] {
            return Err(format!("classes_ must be [0, 1], got {:?}", self.classes));
        }
        if self.coef.len() != 1 {
            return Err(format!(
                "expected one row of coefficients, coef_ has {}",
                self.coef.len()
            ));
        }
        if self.intercept.len() != 1 {
            return Err(format!(
                "expected one intercept, intercept_ has {}",
                self.intercept.len()
            ));
        }
        if let Some(index) = self.coef[0].iter().position(|w| !w.is_finite()) {
            return Err(format!("coef_[0][{index}] is not finite"));
        }
        if !self.intercept[0].is_finite() {
            return Err("intercept_ is not finite".to_string());
        }
        Ok(())
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn weights(&self) -> &[f64] {
        self.coef.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bias(&self) -> f64 {
        self.intercept.first().copied().unwrap_or(0.0)
    }

    pub fn n_features(&self) -> usize {
        self.weights().len()
    }

    /// Linear score `w·x + b` for one scaled row.
    pub fn decision_function(&self, scaled: &[f64]) -> Result<f64, NumericError> {
        let weights = self.weights();
        if scaled.len() != weights.len() {
            return Err(NumericError::DimensionMismatch {
                stage: "classifier",
                expected: weights.len(),
                actual: scaled.len(),
            });
        }

        let z = weights
            .iter()
            .zip(scaled)
            .fold(self.bias(), |acc, (w, x)| acc + w * x);

        if z.is_nan() {
            return Err(NumericError::NonFiniteScore {
                stage: "classifier",
                value: z,
            });
        }
        Ok(z)
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, scaled: &[f64]) -> Result<f64, NumericError> {
        self.decision_function(scaled).map(sigmoid)
    }

    /// Class label (0 or 1) with its positive-class probability.
    pub fn predict(&self, scaled: &[f64]) -> Result<(u8, f64), NumericError> {
        let probability = self.predict_proba(scaled)?;
        let label = u8::from(probability >= DECISION_THRESHOLD);
        Ok((label, probability))
    }
}
