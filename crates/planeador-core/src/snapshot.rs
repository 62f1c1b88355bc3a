//! Snapshot files: loading a finalized `HouseholdFinances` from JSON or TOML
//!
//! Parsing is forgiving about values (see `models`), but a file that is not
//! valid JSON/TOML at all is an error.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::HouseholdFinances;

/// Snapshot serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Toml => "toml",
        }
    }

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
            .map_err(|_| Error::UnsupportedFormat(path.display().to_string()))
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SnapshotFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "toml" => Ok(SnapshotFormat::Toml),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read a snapshot file, choosing the parser by extension
pub fn load(path: impl AsRef<Path>) -> Result<HouseholdFinances> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), format = format.as_str(), "Loading snapshot");
    parse(&content, format)
}

/// Parse a snapshot in the given format
pub fn parse(content: &str, format: SnapshotFormat) -> Result<HouseholdFinances> {
    match format {
        SnapshotFormat::Json => from_json_str(content),
        SnapshotFormat::Toml => from_toml_str(content),
    }
}

pub fn from_json_str(content: &str) -> Result<HouseholdFinances> {
    Ok(serde_json::from_str(content)?)
}

pub fn from_toml_str(content: &str) -> Result<HouseholdFinances> {
    Ok(toml::from_str(content)?)
}

/// Serialize a snapshot in the given format
pub fn render(finances: &HouseholdFinances, format: SnapshotFormat) -> Result<String> {
    match format {
        SnapshotFormat::Json => to_json_pretty(finances),
        SnapshotFormat::Toml => to_toml_string(finances),
    }
}

pub fn to_json_pretty(finances: &HouseholdFinances) -> Result<String> {
    Ok(serde_json::to_string_pretty(finances)?)
}

pub fn to_toml_string(finances: &HouseholdFinances) -> Result<String> {
    Ok(toml::to_string(finances)?)
}
