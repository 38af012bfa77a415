//! Request loop: one JSON application per input line, one JSON result per
//! output line.
//!
//! A request that cannot be scored produces an error object and the loop
//! moves on. Only an I/O failure or a fatal model error ends the session.

use crate::error::PredictorError;
use crate::metrics::SessionMetrics;
use crate::models::inference::InferenceEngine;
use crate::types::application::{InvalidAmount, RawApplication};
use crate::types::decision::LoanDecision;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::string::FromUtf8Error;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Why a single request produced no decision
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("application is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),

    #[error("malformed application: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidAmount),

    #[error(transparent)]
    Prediction(#[from] PredictorError),
}

impl RequestError {
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::InvalidEncoding(_) => "invalid_encoding",
            RequestError::Malformed(_) => "malformed_application",
            RequestError::Invalid(_) => "invalid_application",
            RequestError::Prediction(e) => e.kind(),
        }
    }
}

/// Errors that end the session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read or write the request stream: {0}")]
    Io(#[from] io::Error),

    #[error("unrecoverable model failure on line {line}: {source}")]
    Fatal {
        line: usize,
        #[source]
        source: PredictorError,
    },
}

/// Parse, validate and score one application.
pub fn handle_request(engine: &InferenceEngine, line: &str) -> Result<LoanDecision, RequestError> {
    let application: RawApplication = serde_json::from_str(line)?;
    application.validate()?;
    let prediction = engine.evaluate(&application)?;
    Ok(prediction.to_decision())
}

/// Score every application in `input`, writing one JSON line per request
/// to `output`. Blank lines and `#` comments are skipped.
pub fn run_session<R: BufRead, W: Write>(
    engine: &InferenceEngine,
    input: R,
    output: &mut W,
    metrics: &SessionMetrics,
) -> Result<(), SessionError> {
    serve_lines(input, output, metrics, |line| handle_request(engine, line))
}

fn serve_lines<R, W, F>(
    mut input: R,
    output: &mut W,
    metrics: &SessionMetrics,
    mut score: F,
) -> Result<(), SessionError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<LoanDecision, RequestError>,
{
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let start_time = Instant::now();

        let outcome = match decode_line(&buf) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() || text.starts_with('#') {
                    continue;
                }
                score(text)
            }
            Err(e) => Err(RequestError::from(e)),
        };

        match outcome {
            Ok(decision) => {
                metrics.record_decision(start_time.elapsed(), &decision);
                debug!(
                    line = line_no,
                    decision_id = %decision.decision_id,
                    approved = decision.approved,
                    probability = decision.probability_of_repayment,
                    "Application scored"
                );
                serde_json::to_writer(&mut *output, &decision).map_err(io::Error::from)?;
            }
            Err(RequestError::Prediction(e)) if e.is_fatal() => {
                error!(line = line_no, error = %e, "Unrecoverable model failure");
                return Err(SessionError::Fatal {
                    line: line_no,
                    source: e,
                });
            }
            Err(e) => {
                metrics.record_failure();
                warn!(line = line_no, kind = e.kind(), error = %e, "Application rejected");
                let body = json!({ "line": line_no, "error": e.kind(), "message": e.to_string() });
                serde_json::to_writer(&mut *output, &body).map_err(io::Error::from)?;
            }
        }
        writeln!(output)?;
        output.flush()?;
    }

    Ok(())
}

fn decode_line(raw: &[u8]) -> Result<String, FromUtf8Error> {
    let mut bytes = raw.to_vec();
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    String::from_utf8(bytes)
}
