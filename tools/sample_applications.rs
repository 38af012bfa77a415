//! Sample Application Generator
//!
//! Writes randomly generated loan applications as JSON lines, ready to be
//! piped into `loan-predict`.
//!
//! Usage: sample-applications [count] [strong_rate] [seed]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

/// Application in the form-label layout the predictor accepts
#[derive(Debug, Clone, Serialize)]
struct Application {
    #[serde(rename = "Married")]
    married: &'static str,
    #[serde(rename = "Education")]
    education: &'static str,
    #[serde(rename = "Credit_History")]
    credit_history: &'static str,
    #[serde(rename = "ApplicantIncome")]
    applicant_income: f64,
    #[serde(rename = "CoapplicantIncome")]
    coapplicant_income: f64,
    #[serde(rename = "LoanAmount")]
    loan_amount: f64,
    #[serde(rename = "Property_Area")]
    property_area: &'static str,
}

/// Application generator for exercising the predictor
struct ApplicationGenerator {
    rng: StdRng,
}

impl ApplicationGenerator {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Applicant with a credit history and a modest loan
    fn generate_strong(&mut self) -> Application {
        Application {
            married: self.random_choice(&["Yes", "Yes", "No"]),
            education: self.random_choice(&["Graduate", "Graduate", "Not Graduate"]),
            credit_history: "Yes",
            applicant_income: self.amount(3000.0, 12000.0),
            coapplicant_income: self.amount(0.0, 4000.0),
            loan_amount: self.amount(60.0, 200.0),
            property_area: self.random_choice(&["Semi-Urban", "Urban", "Rural"]),
        }
    }

    /// Applicant without a credit history
    fn generate_weak(&mut self) -> Application {
        Application {
            married: self.random_choice(&["Yes", "No", "No"]),
            education: self.random_choice(&["Graduate", "Not Graduate"]),
            credit_history: "No",
            applicant_income: self.amount(1000.0, 6000.0),
            coapplicant_income: self.amount(0.0, 1500.0),
            loan_amount: self.amount(100.0, 500.0),
            property_area: self.random_choice(&["Rural", "Urban", "Semi-Urban"]),
        }
    }

    fn amount(&mut self, low: f64, high: f64) -> f64 {
        (self.rng.gen_range(low..high) / 10.0).round() * 10.0
    }

    fn random_choice(&mut self, choices: &[&'static str]) -> &'static str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean JSON-lines stream
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_applications=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(20);
    let strong_rate: f64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.7_f64)
        .clamp(0.0, 1.0);
    let seed: Option<u64> = args.get(3).and_then(|s| s.parse().ok());

    info!(count = count, strong_rate = strong_rate, seed = ?seed, "Generating applications");

    let mut generator = ApplicationGenerator::new(seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut strong_count = 0;

    for _ in 0..count {
        let application = if generator.rng.gen_bool(strong_rate) {
            strong_count += 1;
            generator.generate_strong()
        } else {
            generator.generate_weak()
        };

        serde_json::to_writer(&mut out, &application)?;
        writeln!(out)?;
    }

    info!(
        "Completed! Generated {} applications ({} strong, {} weak)",
        count,
        strong_count,
        count - strong_count
    );

    Ok(())
}
