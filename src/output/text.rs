//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One aligned line per outdated dependency with colors
//! - Major update highlighting
//! - A summary line with the number of major updates

use crate::domain::{DependencyRecord, MAJOR_UPDATE_MARKER};
use crate::model::CheckReport;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Calculate the maximum package name length for alignment
    fn max_name_length(records: &[DependencyRecord]) -> usize {
        records.iter().map(|r| r.name.len()).max().unwrap_or(0)
    }

    /// Format a single dependency line
    fn format_record_line(
        &self,
        record: &DependencyRecord,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let marker = if record.is_major_update {
            format!("{} ", MAJOR_UPDATE_MARKER)
        } else {
            "   ".to_string()
        };

        if self.color {
            let name_display = format!("{:width$}", record.name, width = max_name_len);
            let name_display = if record.is_major_update {
                name_display.yellow().bold().to_string()
            } else {
                name_display.bold().to_string()
            };
            let latest = if record.is_major_update {
                record.latest_version.red().bold().to_string()
            } else {
                record.latest_version.green().to_string()
            };
            writeln!(
                writer,
                "{}{} {} {} {} {} {}",
                marker,
                name_display,
                record.installed().dimmed(),
                "→".dimmed(),
                record.wanted_version.bright_white(),
                "latest".dimmed(),
                latest
            )?;
        } else {
            writeln!(
                writer,
                "{}{:width$} {} -> {} latest {}",
                marker,
                record.name,
                record.installed(),
                record.wanted_version,
                record.latest_version,
                width = max_name_len
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            for line in record.tooltip().lines() {
                if self.color {
                    writeln!(writer, "      {}", line.dimmed())?;
                } else {
                    writeln!(writer, "      {}", line)?;
                }
            }
        }

        Ok(())
    }

    /// Write the summary line
    fn format_summary(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let total = report.records.len();
        let majors = report.major_updates().count();
        let noun = if total == 1 { "dependency" } else { "dependencies" };

        if self.color {
            writeln!(
                writer,
                "{} outdated {}, {} with a major update",
                total.to_string().bold(),
                noun,
                if majors > 0 {
                    majors.to_string().red().bold().to_string()
                } else {
                    majors.to_string().green().to_string()
                }
            )
        } else {
            writeln!(
                writer,
                "{} outdated {}, {} with a major update",
                total, noun, majors
            )
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // Empty and failed checks are already reported through notices
        if report.records.is_empty() {
            return Ok(());
        }

        if self.verbosity == Verbosity::Quiet {
            for record in &report.records {
                writeln!(writer, "{}", record.label())?;
            }
            return Ok(());
        }

        let max_name_len = Self::max_name_length(&report.records);
        for record in &report.records {
            self.format_record_line(record, max_name_len, writer)?;
        }
        writeln!(writer)?;
        self.format_summary(report, writer)
    }

    fn format_names(&self, names: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        for name in names {
            writeln!(writer, "{}", name)?;
        }
        Ok(())
    }
}
