//! Loan application data structures

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Highest education level declared on the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "Graduate", alias = "graduate")]
    Graduate,
    #[serde(
        rename = "Not Graduate",
        alias = "NotGraduate",
        alias = "not_graduate",
        alias = "not graduate"
    )]
    NotGraduate,
}

/// Location of the property the loan is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyArea {
    #[serde(rename = "Rural", alias = "rural")]
    Rural,
    #[serde(rename = "Urban", alias = "urban")]
    Urban,
    #[serde(
        rename = "Semi-Urban",
        alias = "Semiurban",
        alias = "semiurban",
        alias = "semi_urban",
        alias = "semi-urban"
    )]
    SemiUrban,
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Education::Graduate => f.write_str("Graduate"),
            Education::NotGraduate => f.write_str("Not Graduate"),
        }
    }
}

impl fmt::Display for PropertyArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyArea::Rural => f.write_str("Rural"),
            PropertyArea::Urban => f.write_str("Urban"),
            PropertyArea::SemiUrban => f.write_str("Semi-Urban"),
        }
    }
}

/// One applicant's details as entered by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    /// Marital status
    #[serde(alias = "Married", deserialize_with = "yes_no")]
    pub married: bool,

    /// Graduate or not
    #[serde(alias = "Education")]
    pub education: Education,

    /// Whether the applicant has a credit history
    #[serde(alias = "Credit_History", deserialize_with = "yes_no")]
    pub credit_history: bool,

    /// Applicant income
    #[serde(alias = "ApplicantIncome", alias = "Applicant_Income")]
    pub applicant_income: f64,

    /// Co-applicant income
    #[serde(alias = "CoapplicantIncome", alias = "Coapplicant_Income")]
    pub coapplicant_income: f64,

    /// Requested loan amount
    #[serde(alias = "LoanAmount", alias = "Loan_Amount")]
    pub loan_amount: f64,

    /// Property area
    #[serde(alias = "Property_Area")]
    pub property_area: PropertyArea,
}

/// A monetary field that cannot be scored
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be a non-negative amount, got {value}")]
pub struct InvalidAmount {
    pub field: &'static str,
    pub value: f64,
}

impl RawApplication {
    /// Build an application from its form values
    pub fn new(
        married: bool,
        education: Education,
        credit_history: bool,
        applicant_income: f64,
        coapplicant_income: f64,
        loan_amount: f64,
        property_area: PropertyArea,
    ) -> Self {
        Self {
            married,
            education,
            credit_history,
            applicant_income,
            coapplicant_income,
            loan_amount,
            property_area,
        }
    }

    /// Reject negative or non-finite amounts before the application is scored.
    pub fn validate(&self) -> Result<(), InvalidAmount> {
        let amounts = [
            ("applicant_income", self.applicant_income),
            ("coapplicant_income", self.coapplicant_income),
            ("loan_amount", self.loan_amount),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}

impl Default for RawApplication {
    /// The form's initial state.
    fn default() -> Self {
        Self {
            married: false,
            education: Education::NotGraduate,
            credit_history: false,
            applicant_income: 5000.0,
            coapplicant_income: 0.0,
            loan_amount: 150.0,
            property_area: PropertyArea::Rural,
        }
    }
}

/// Accepts `true`/`false` as well as the form's "Yes"/"No" answers.
fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Answer {
        Flag(bool),
        Text(String),
    }

    match Answer::deserialize(deserializer)? {
        Answer::Flag(flag) => Ok(flag),
        Answer::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected Yes or No, got {other:?}"
            ))),
        },
    }
}
