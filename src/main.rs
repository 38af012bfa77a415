//! Loan Approval Predictor - Main Entry Point
//!
//! Loads the fitted artifacts once, then scores applications read as JSON
//! lines from a file or stdin, writing one decision per line to stdout.

use anyhow::{Context, Result};
use loan_approval_predictor::{
    config::{AppConfig, LogFormat},
    metrics::SessionMetrics,
    models::{ArtifactCache, ArtifactLoader, InferenceEngine},
    session::run_session,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config)?;

    info!("Starting Loan Approval Predictor");
    info!(
        search_dirs = ?config.artifacts.search_dirs,
        classifier = %config.artifacts.classifier_file,
        scaler = %config.artifacts.scaler_file,
        columns = %config.artifacts.columns_file,
        "Configuration loaded"
    );

    // Artifacts are a startup dependency: nothing is served without them
    let cache = ArtifactCache::new();
    let loader = ArtifactLoader::from_config(&config.artifacts);
    let candidates = config.artifacts.candidate_dirs();
    let bundle = match cache.get_or_load(&loader, &candidates) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Failed to load model artifacts");
            return Err(e).context("Model files not found or unreadable");
        }
    };

    let engine = InferenceEngine::new(bundle);
    info!(
        features = engine.bundle().dimension(),
        source = ?engine.bundle().source_dir(),
        "Inference engine ready"
    );

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("Failed to open {path}"))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let metrics = SessionMetrics::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = run_session(&engine, input, &mut out, &metrics);
    metrics.print_summary();
    outcome.context("Session aborted")?;

    info!("Input exhausted, shutting down");
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn")
            .add_directive(format!("loan_approval_predictor={}", config.logging.level).parse()?)
            .add_directive(format!("loan_predict={}", config.logging.level).parse()?),
    };

    // stdout carries decisions; logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    Ok(())
}
