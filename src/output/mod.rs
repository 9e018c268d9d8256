//! Output formatting for dependency reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - The legend explaining the version columns

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::MAJOR_UPDATE_MARKER;
use crate::model::CheckReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

impl Verbosity {
    /// Verbosity from the CLI flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        Self {
            format,
            verbosity: Verbosity::from_flags(verbose, quiet),
            color: !no_color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a check report
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write a plain list of package names
    fn format_names(&self, names: &[String], writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => {
            Box::new(TextFormatter::with_color(config.verbosity, config.color))
        }
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

/// Explanation of the columns shown for each dependency
pub fn legend() -> String {
    format!(
        "ℹ️ Help:\n\
         - Installed: Version in node_modules\n\
         - Wanted: Matches version range in package.json\n\
         - Latest: Most recent version on npm\n\
         {} Major updates may include breaking changes.",
        MAJOR_UPDATE_MARKER
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_text_verbose() {
        let config = OutputConfig::from_cli(false, true, false, false);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_no_color() {
        let config = OutputConfig::from_cli(false, false, false, true);
        assert!(!config.color);
    }

    #[test]
    fn test_legend_mentions_every_column() {
        let legend = legend();
        assert!(legend.contains("Installed: Version in node_modules"));
        assert!(legend.contains("Wanted: Matches version range in package.json"));
        assert!(legend.contains("Latest: Most recent version on npm"));
        assert!(legend.contains("⚠️ Major updates may include breaking changes."));
    }
}
