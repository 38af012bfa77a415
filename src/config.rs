//! Configuration management for the loan predictor

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "LOAN_PREDICTOR_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub logging: LoggingConfig,
}

/// Model artifact location configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory names tried in order; relative names resolve against the
    /// base directory, then the working directory
    pub search_dirs: Vec<String>,
    /// Base directory for relative search dirs (default: the directory
    /// above the one holding the executable)
    pub base_dir: Option<PathBuf>,
    /// Exported classifier file name
    pub classifier_file: String,
    /// Exported scaler file name
    pub scaler_file: String,
    /// Column manifest file name
    pub columns_file: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            search_dirs: vec!["Model".to_string(), "model".to_string()],
            base_dir: None,
            classifier_file: "LogisticRegression.json".to_string(),
            scaler_file: "StandardScaler.json".to_string(),
            columns_file: "columns.json".to_string(),
        }
    }
}

impl ArtifactsConfig {
    /// Ordered, de-duplicated list of directories to search for artifacts.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let base = self.base_dir.clone().or_else(entry_point_base);
        let cwd = std::env::current_dir().ok();
        self.candidate_dirs_from(base.as_deref(), cwd.as_deref())
    }

    /// Candidate directories for explicit base and working directories.
    pub fn candidate_dirs_from(&self, base: Option<&Path>, cwd: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        let mut push = |path: PathBuf| {
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        };

        let (absolute, relative): (Vec<&String>, Vec<&String>) = self
            .search_dirs
            .iter()
            .partition(|dir| Path::new(dir).is_absolute());

        for dir in absolute {
            push(PathBuf::from(dir));
        }
        for root in [base, cwd].into_iter().flatten() {
            for dir in &relative {
                push(root.join(dir));
            }
        }
        if base.is_none() && cwd.is_none() {
            for dir in relative {
                push(PathBuf::from(dir));
            }
        }

        candidates
    }
}

/// Directory above the one holding the running executable, mirroring a
/// `model` directory deployed as a sibling of the application directory.
fn entry_point_base() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe_dir = exe.parent()?;
    exe_dir.parent().map(Path::to_path_buf)
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from `LOAN_PREDICTOR_CONFIG` or `config/config.toml`
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path, layered under environment
    /// overrides (`LOAN_PREDICTOR__ARTIFACTS__SEARCH_DIRS=...`). A missing
    /// file falls back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("LOAN_PREDICTOR")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("artifacts.search_dirs")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
