//! Entries reported by `npm outdated --json`
//!
//! The tool prints an object keyed by package name:
//!
//! ```json
//! {
//!   "lodash": { "current": "4.17.20", "wanted": "4.17.21", "latest": "4.17.21" }
//! }
//! ```
//!
//! Extra fields (`dependent`, `location`, `type`, ...) are ignored. Key order is
//! preserved so records come out in the order npm printed them.

use super::is_major_update;
use crate::error::CheckError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One package's `{current, wanted, latest}` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutdatedEntry {
    /// Package name (the object key)
    pub name: String,
    /// Installed version, empty when the package is declared but not installed
    pub current: String,
    /// Highest version satisfying the declared range
    pub wanted: String,
    /// Newest version on the registry
    pub latest: String,
}

/// Result of parsing the tool output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutdatedOutput {
    /// Nothing is outdated
    Empty,
    /// Outdated packages in output order
    Entries(Vec<RawOutdatedEntry>),
}

#[derive(Debug, Deserialize)]
struct OutdatedFields {
    #[serde(default)]
    current: Option<String>,
    wanted: String,
    latest: String,
}

#[derive(Debug, Deserialize)]
struct ToolErrorReport {
    #[serde(default)]
    code: Option<String>,
    summary: String,
}

impl RawOutdatedEntry {
    /// Creates a new entry
    pub fn new(
        name: impl Into<String>,
        current: impl Into<String>,
        wanted: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            wanted: wanted.into(),
            latest: latest.into(),
        }
    }

    /// Whether moving to `latest` crosses a major version
    pub fn is_major_update(&self) -> bool {
        is_major_update(&self.wanted, &self.latest)
    }
}

impl OutdatedOutput {
    /// Package names in output order
    pub fn names(&self) -> Vec<String> {
        match self {
            OutdatedOutput::Empty => Vec::new(),
            OutdatedOutput::Entries(entries) => entries.iter().map(|e| e.name.clone()).collect(),
        }
    }
}

/// Parse the stdout of `npm outdated --json`
///
/// Blank output, the literal `{}` and an object without keys all mean that
/// nothing is outdated. An `{"error": {...}}` report is surfaced as a tool
/// failure rather than a parse failure.
pub fn parse_outdated_output(stdout: &str) -> Result<OutdatedOutput, CheckError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(OutdatedOutput::Empty);
    }

    let object: Map<String, Value> =
        serde_json::from_str(trimmed).map_err(|e| CheckError::output_parse_failed(e.to_string()))?;

    if object.is_empty() {
        return Ok(OutdatedOutput::Empty);
    }

    if let Some(report) = tool_error_report(&object) {
        let message = match report.code {
            Some(code) => format!("{}: {}", code, report.summary),
            None => report.summary,
        };
        return Err(CheckError::tool_invocation_failed(message));
    }

    let mut entries = Vec::with_capacity(object.len());
    for (name, value) in object {
        let fields: OutdatedFields = serde_json::from_value(value)
            .map_err(|e| CheckError::output_parse_failed(format!("{}: {}", name, e)))?;
        entries.push(RawOutdatedEntry {
            name,
            current: fields.current.unwrap_or_default(),
            wanted: fields.wanted,
            latest: fields.latest,
        });
    }

    Ok(OutdatedOutput::Entries(entries))
}

/// npm reports failures as `{"error": {"code": ..., "summary": ...}}`
fn tool_error_report(object: &Map<String, Value>) -> Option<ToolErrorReport> {
    if object.len() != 1 {
        return None;
    }
    let value = object.get("error")?;
    if value.get("wanted").is_some() {
        // a package that happens to be called "error"
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
