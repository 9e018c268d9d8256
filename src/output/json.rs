//! JSON output formatter for machine processing

use crate::domain::DependencyRecord;
use crate::model::{CheckReport, CheckStatus};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a check
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// "empty", "success" or "error"
    status: &'static str,
    /// Error message for failed checks
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Number of outdated packages
    total: usize,
    /// Number of major updates
    major: usize,
    /// Outdated packages
    outdated: Vec<JsonRecord<'a>>,
}

/// JSON representation of one record
#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a DependencyRecord,
    /// Display label
    label: String,
}

/// JSON representation of a names list
#[derive(Serialize)]
struct JsonNames<'a> {
    names: &'a [String],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let (status, error) = match &report.status {
            CheckStatus::Empty => ("empty", None),
            CheckStatus::Success => ("success", None),
            CheckStatus::Error(e) => ("error", Some(e.to_string())),
        };

        let output = JsonOutput {
            status,
            error,
            total: report.records.len(),
            major: report.major_updates().count(),
            outdated: report
                .records
                .iter()
                .map(|record| JsonRecord {
                    record,
                    label: record.label(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_names(&self, names: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &JsonNames { names })?;
        writeln!(writer)
    }
}
