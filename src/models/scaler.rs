//! Fitted standardization transform

use crate::error::NumericError;
use serde::{Deserialize, Serialize};

/// Per-feature `(x - mean) / scale` transform learned on the training data.
///
/// Field names follow the fitted attributes of the exported object
/// (`mean_`, `scale_`, `n_features_in_`, `feature_names_in_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(rename = "mean_")]
    mean: Vec<f64>,
    #[serde(rename = "scale_")]
    scale: Vec<f64>,
    #[serde(rename = "n_features_in_", default, skip_serializing_if = "Option::is_none")]
    n_features_in: Option<usize>,
    #[serde(rename = "feature_names_in_", default, skip_serializing_if = "Option::is_none")]
    feature_names_in: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            n_features_in: Some(mean.len()),
            mean,
            scale,
            feature_names_in: None,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names_in = Some(names);
        self
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    /// Check the fitted arrays against each other.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean_ has {} entries but scale_ has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(n) = self.n_features_in {
            if n != self.mean.len() {
                return Err(format!(
                    "n_features_in_ is {n} but mean_ has {} entries",
                    self.mean.len()
                ));
            }
        }
        if let Some(index) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean_[{index}] is not finite"));
        }
        Ok(())
    }

    /// Index of the first scale entry that cannot be divided by.
    pub fn degenerate_index(&self) -> Option<usize> {
        self.scale.iter().position(|s| *s == 0.0 || !s.is_finite())
    }

    /// Standardize one row that is already in fitted column order.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, NumericError> {
        if row.len() != self.mean.len() || row.len() != self.scale.len() {
            return Err(NumericError::DimensionMismatch {
                stage: "scaler",
                expected: self.mean.len(),
                actual: row.len(),
            });
        }

        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .enumerate()
            .map(|(index, (&x, (&mean, &scale)))| {
                if scale == 0.0 || !scale.is_finite() {
                    return Err(NumericError::ZeroScale { index });
                }
                let value = (x - mean) / scale;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(NumericError::NonFinite {
                        stage: "scaler",
                        index,
                        value,
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_standardizes() {
        let scaler = StandardScaler::new(vec![1.0, 100.0], vec![2.0, 50.0]);

        let scaled = scaler.transform(&[3.0, 50.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -1.0]);
    }

    #[test]
    fn test_transform_rejects_zero_scale() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]);

        assert_eq!(scaler.degenerate_index(), Some(1));
        assert_eq!(
            scaler.transform(&[1.0, 1.0]),
            Err(NumericError::ZeroScale { index: 1 })
        );
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let scaler = StandardScaler::new(vec![0.0; 7], vec![1.0; 7]);

        let err = scaler.transform(&[0.0; 6]).unwrap_err();
        assert!(matches!(
            err,
            NumericError::DimensionMismatch { expected: 7, actual: 6, .. }
        ));
    }

    #[test]
    fn test_transform_rejects_nan_input() {
        let scaler = StandardScaler::new(vec![0.0], vec![1.0]);
        assert!(matches!(
            scaler.transform(&[f64::NAN]),
            Err(NumericError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn test_deserialize_fitted_attributes() {
        let json = r#"{
            "mean_": [0.5, 10.0],
            "scale_": [0.5, 2.0],
            "n_features_in_": 2,
            "feature_names_in_": ["a", "b"]
        }"#;
        let scaler: StandardScaler = serde_json::from_str(json).unwrap();

        assert_eq!(scaler.n_features(), 2);
        assert!(scaler.check_shape().is_ok());
        assert_eq!(scaler.feature_names().unwrap()[1], "b");
    }

    #[test]
    fn test_shape_check_catches_length_disagreement() {
        let json = r#"{"mean_": [0.5, 10.0], "scale_": [0.5], "n_features_in_": 2}"#;
        let scaler: StandardScaler = serde_json::from_str(json).unwrap();
        assert!(scaler.check_shape().is_err());
    }
}
