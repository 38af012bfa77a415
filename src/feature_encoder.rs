//! Feature encoding for loan repayment model inference.
//!
//! This module turns the operator's form values into the named numeric
//! row the fitted scaler and classifier were trained on.

use crate::error::{PredictorError, PredictorResult};
use crate::models::columns::ColumnManifest;
use crate::types::application::{Education, PropertyArea, RawApplication};
use serde::{Deserialize, Serialize};

/// Encoded feature names, in the order the training pipeline emitted them.
pub const FEATURE_NAMES: [&str; 7] = [
    "Credit_History",
    "Property_Area_Semiurban",
    "Married",
    "Education",
    "Applicant_Income",
    "Coapplicant_Income",
    "Loan_Amount",
];

/// One application encoded into the model's named numeric features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    #[serde(rename = "Credit_History")]
    pub credit_history: f64,
    #[serde(rename = "Property_Area_Semiurban")]
    pub property_area_semiurban: f64,
    #[serde(rename = "Married")]
    pub married: f64,
    #[serde(rename = "Education")]
    pub education: f64,
    #[serde(rename = "Applicant_Income")]
    pub applicant_income: f64,
    #[serde(rename = "Coapplicant_Income")]
    pub coapplicant_income: f64,
    #[serde(rename = "Loan_Amount")]
    pub loan_amount: f64,
}

impl EncodedFeatureVector {
    /// Named fields in training order.
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            (FEATURE_NAMES[0], self.credit_history),
            (FEATURE_NAMES[1], self.property_area_semiurban),
            (FEATURE_NAMES[2], self.married),
            (FEATURE_NAMES[3], self.education),
            (FEATURE_NAMES[4], self.applicant_income),
            (FEATURE_NAMES[5], self.coapplicant_income),
            (FEATURE_NAMES[6], self.loan_amount),
        ]
    }

    /// Value of a feature by column name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Lay the features out in manifest order.
    ///
    /// Fails with `SchemaMismatch` when the manifest names a column this
    /// vector does not carry, or when the counts disagree.
    pub fn reorder(&self, columns: &ColumnManifest) -> PredictorResult<Vec<f64>> {
        check_schema(columns)?;
        columns
            .iter()
            .map(|name| self.get(name).ok_or_else(|| schema_mismatch(columns)))
            .collect()
    }
}

/// Encoder that maps a `RawApplication` to the model's feature row.
///
/// Property area is reduced to a single Semi-Urban indicator: Rural and
/// Urban both encode to 0, exactly as the fitted artifact expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new feature encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode an application and check the result against the manifest.
    pub fn encode(
        &self,
        raw: &RawApplication,
        columns: &ColumnManifest,
    ) -> PredictorResult<EncodedFeatureVector> {
        let encoded = self.encode_unchecked(raw);
        check_schema(columns)?;
        Ok(encoded)
    }

    /// Encode without consulting a manifest.
    pub fn encode_unchecked(&self, raw: &RawApplication) -> EncodedFeatureVector {
        EncodedFeatureVector {
            credit_history: indicator(raw.credit_history),
            property_area_semiurban: indicator(raw.property_area == PropertyArea::SemiUrban),
            married: indicator(raw.married),
            education: indicator(raw.education == Education::Graduate),
            applicant_income: raw.applicant_income,
            coapplicant_income: raw.coapplicant_income,
            loan_amount: raw.loan_amount,
        }
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_NAMES.len()
    }

    /// Get feature names (training order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// The encoded field set must equal the manifest's column set.
fn check_schema(columns: &ColumnManifest) -> PredictorResult<()> {
    let complete = columns.len() == FEATURE_NAMES.len()
        && FEATURE_NAMES.iter().all(|name| columns.contains(name));
    if complete {
        Ok(())
    } else {
        Err(schema_mismatch(columns))
    }
}

fn schema_mismatch(columns: &ColumnManifest) -> PredictorError {
    let missing = columns
        .iter()
        .filter(|name| !FEATURE_NAMES.contains(name))
        .map(str::to_string)
        .collect();
    let unexpected = FEATURE_NAMES
        .iter()
        .filter(|name| !columns.contains(name))
        .map(|name| name.to_string())
        .collect();

    PredictorError::SchemaMismatch {
        expected: columns.len(),
        actual: FEATURE_NAMES.len(),
        missing,
        unexpected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ColumnManifest {
        ColumnManifest::new(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_feature_encoding() {
        let encoder = FeatureEncoder::new();
        let app = RawApplication::new(
            true,
            Education::Graduate,
            true,
            4583.0,
            1508.0,
            128.0,
            PropertyArea::SemiUrban,
        );

        let encoded = encoder.encode(&app, &manifest()).unwrap();

        assert_eq!(encoded.credit_history, 1.0);
        assert_eq!(encoded.property_area_semiurban, 1.0);
        assert_eq!(encoded.married, 1.0);
        assert_eq!(encoded.education, 1.0);
        assert_eq!(encoded.applicant_income, 4583.0);
        assert_eq!(encoded.coapplicant_income, 1508.0);
        assert_eq!(encoded.loan_amount, 128.0);
    }

    #[test]
    fn test_rural_and_urban_collapse() {
        let encoder = FeatureEncoder::new();
        let mut app = RawApplication::default();

        app.property_area = PropertyArea::Rural;
        let rural = encoder.encode_unchecked(&app);
        app.property_area = PropertyArea::Urban;
        let urban = encoder.encode_unchecked(&app);
        app.property_area = PropertyArea::SemiUrban;
        let semi = encoder.encode_unchecked(&app);

        assert_eq!(rural, urban);
        assert_eq!(rural.property_area_semiurban, 0.0);
        assert_eq!(semi.property_area_semiurban, 1.0);
    }

    #[test]
    fn test_reorder_follows_manifest() {
        let encoder = FeatureEncoder::new();
        let encoded = encoder.encode_unchecked(&RawApplication::default());

        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names.reverse();
        let reversed = ColumnManifest::new(names).unwrap();

        let row = encoded.reorder(&reversed).unwrap();
        assert_eq!(row, vec![150.0, 0.0, 5000.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_column_is_schema_mismatch() {
        let encoder = FeatureEncoder::new();
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names[1] = "Property_Area_Urban".to_string();
        let columns = ColumnManifest::new(names).unwrap();

        let err = encoder
            .encode(&RawApplication::default(), &columns)
            .unwrap_err();
        match err {
            PredictorError::SchemaMismatch {
                missing,
                unexpected,
                ..
            } => {
                assert_eq!(missing, vec!["Property_Area_Urban".to_string()]);
                assert_eq!(unexpected, vec!["Property_Area_Semiurban".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_short_manifest_is_schema_mismatch() {
        let encoder = FeatureEncoder::new();
        let columns = ColumnManifest::new(
            FEATURE_NAMES[..6].iter().map(|s| s.to_string()).collect(),
        )
        .unwrap();

        let encoded = encoder.encode_unchecked(&RawApplication::default());
        assert!(matches!(
            encoded.reorder(&columns),
            Err(PredictorError::SchemaMismatch { expected: 6, actual: 7, .. })
        ));
    }

    #[test]
    fn test_feature_count() {
        let encoder = FeatureEncoder::new();
        assert_eq!(encoder.feature_count(), 7);
        assert_eq!(encoder.feature_names().len(), 7);
    }
}
