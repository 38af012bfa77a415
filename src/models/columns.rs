//! Ordered feature manifest shipped alongside the fitted model

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column names in the exact order the scaler and classifier were fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnManifest {
    columns: Vec<String>,
}

impl ColumnManifest {
    /// Build a manifest, rejecting empty or duplicated column lists.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("column manifest is empty".to_string());
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.trim().is_empty() {
                return Err("column manifest contains a blank name".to_string());
            }
            if !seen.insert(name.as_str()) {
                return Err(format!("column {name} appears more than once"));
            }
        }

        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl TryFrom<Vec<String>> for ColumnManifest {
    type Error = String;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnManifest> for Vec<String> {
    fn from(manifest: ColumnManifest) -> Self {
        manifest.columns
    }
}
