//! Loan decision records returned to the caller

use crate::models::inference::PredictionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Approved,
    Rejected,
}

impl DecisionStatus {
    pub fn headline(&self) -> &'static str {
        match self {
            DecisionStatus::Approved => "Loan Approved",
            DecisionStatus::Rejected => "Loan Rejected",
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            DecisionStatus::Approved => "Congratulations! Your application meets our criteria.",
            DecisionStatus::Rejected => {
                "Unfortunately, your application does not meet our criteria at this time."
            }
        }
    }
}

/// Decision rendered for one scored application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDecision {
    /// Unique decision identifier
    pub decision_id: String,

    /// Approved or rejected
    pub status: DecisionStatus,

    /// Whether the loan is approved
    pub approved: bool,

    /// Probability of repayment (0.0 - 1.0)
    pub probability_of_repayment: f64,

    /// Operator-facing summary
    pub message: String,

    /// Decision timestamp
    pub timestamp: DateTime<Utc>,
}

impl LoanDecision {
    /// Create a decision from a prediction
    pub fn new(result: &PredictionResult) -> Self {
        let status = if result.approved {
            DecisionStatus::Approved
        } else {
            DecisionStatus::Rejected
        };

        Self {
            decision_id: uuid::Uuid::new_v4().to_string(),
            status,
            approved: result.approved,
            probability_of_repayment: result.probability_of_repayment,
            message: format!(
                "{}. Probability of Repayment: {}. {}",
                status.headline(),
                format_percent(result.probability_of_repayment),
                status.detail()
            ),
            timestamp: Utc::now(),
        }
    }
}

/// Probability as a percentage with two decimals, e.g. `87.12%`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
