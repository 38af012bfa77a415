//! Shared fixtures: an on-disk artifact directory matching `Model/`.

#![allow(dead_code)]

use loan_approval_predictor::types::{Education, PropertyArea, RawApplication};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const COLUMNS: [&str; 7] = [
    "Credit_History",
    "Property_Area_Semiurban",
    "Married",
    "Education",
    "Applicant_Income",
    "Coapplicant_Income",
    "Loan_Amount",
];

pub const MEAN: [f64; 7] = [
    0.8429752066115702,
    0.3801652892561983,
    0.6487603305785124,
    0.7789256198347108,
    5403.459283387622,
    1621.2457980271008,
    146.41216216216216,
];

pub const SCALE: [f64; 7] = [
    0.3638313963434962,
    0.4854094028532651,
    0.4773727364016543,
    0.4149951367283017,
    6104.064856533893,
    2923.8644597700627,
    85.51800910101028,
];

pub const COEF: [f64; 7] = [
    1.2178455304116186,
    0.3051869742391524,
    0.2247117351260874,
    0.1583504113946237,
    0.0127466190818934,
    -0.0512383069471736,
    -0.1046728453113289,
];

pub const INTERCEPT: f64 = 0.9275416807231046;

pub const CLASSIFIER_FILE: &str = "LogisticRegression.json";
pub const SCALER_FILE: &str = "StandardScaler.json";
pub const COLUMNS_FILE: &str = "columns.json";

pub fn classifier_json() -> Value {
    json!({ "classes_": [0, 1], "coef_": [COEF], "intercept_": [INTERCEPT] })
}

pub fn scaler_json() -> Value {
    json!({
        "mean_": MEAN,
        "scale_": SCALE,
        "n_features_in_": 7,
        "feature_names_in_": COLUMNS,
    })
}

pub fn columns_json() -> Value {
    json!(COLUMNS)
}

/// Write the reference artifacts into `dir`, creating it.
pub fn write_artifacts(dir: &Path) {
    write_artifacts_with(dir, classifier_json(), scaler_json(), columns_json());
}

pub fn write_artifacts_with(dir: &Path, classifier: Value, scaler: Value, columns: Value) {
    fs::create_dir_all(dir).unwrap();
    write_json(&dir.join(CLASSIFIER_FILE), &classifier);
    write_json(&dir.join(SCALER_FILE), &scaler);
    write_json(&dir.join(COLUMNS_FILE), &columns);
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// The `Model/` directory shipped with the crate.
pub fn shipped_model_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("Model")
}

/// Scenario A: no credit history, single, not a graduate, rural.
pub fn scenario_a() -> RawApplication {
    RawApplication::new(
        false,
        Education::NotGraduate,
        false,
        5000.0,
        0.0,
        150.0,
        PropertyArea::Rural,
    )
}

/// Scenario B: scenario A with every categorical answer positive.
pub fn scenario_b() -> RawApplication {
    RawApplication {
        married: true,
        education: Education::Graduate,
        credit_history: true,
        property_area: PropertyArea::SemiUrban,
        ..scenario_a()
    }
}
